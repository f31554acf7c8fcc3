//! Configuration Tests.
//!
//! Verifies JSON parsing with defaults, validation, and trace path layout.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use sp_core::SimError;
use sp_core::config::{Config, TraceConfig};

#[test]
fn default_matches_reference_machine() {
    let config = Config::default();
    assert_eq!(config.pipeline.btb_size, 8);
    assert_eq!(config.memory.sram_height, 65536);
    assert_eq!(config.general.max_cycles, None);
    assert!(config.trace.enabled);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_document_is_all_defaults() {
    let config = Config::from_json("{}").expect("parse");
    assert_eq!(config.pipeline.btb_size, Config::default().pipeline.btb_size);
    assert_eq!(config.trace.output_dir, PathBuf::from("."));
}

#[test]
fn partial_sections_keep_other_defaults() {
    let json = r#"{ "trace": { "dma": false, "output_dir": "out" } }"#;
    let config = Config::from_json(json).expect("parse");
    assert!(config.trace.enabled);
    assert!(config.trace.instructions);
    assert!(!config.trace.dma);
    assert_eq!(config.trace.dma_trace_path(), PathBuf::from("out/dma_trace.txt"));
    assert_eq!(config.trace.sramd_dump_path(), PathBuf::from("out/sramd_out.txt"));
}

#[test]
fn malformed_json_is_config_error() {
    let err = Config::from_json("{ pipeline: ").unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "{err:?}");
}

#[test]
fn zero_btb_rejected() {
    let err = Config::from_json(r#"{ "pipeline": { "btb_size": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("btb_size"), "{err}");
}

#[test]
fn oversized_sram_rejected() {
    let json = r#"{ "memory": { "sram_height": 65537 } }"#;
    assert!(matches!(Config::from_json(json), Err(SimError::Config(_))));
}

#[test]
fn zero_cycle_limit_rejected() {
    let json = r#"{ "general": { "max_cycles": 0 } }"#;
    assert!(matches!(Config::from_json(json), Err(SimError::Config(_))));
}

#[test]
fn disabled_trace_turns_off_master_switch_only() {
    let trace = TraceConfig::disabled();
    assert!(!trace.enabled);
    assert!(trace.instructions);
    assert_eq!(trace.inst_trace_path(), PathBuf::from("./inst_trace.txt"));
}
