//! Configuration system for the SP simulator.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (BTB size, SRAM height, trace file names).
//! 2. **Structures:** Hierarchical config for general, pipeline, memory, and trace settings.
//! 3. **Validation:** Consistency checks run before a simulator is built.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or use `Config::default()`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::constants::SRAM_HEIGHT;
use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Branch Target Buffer entry count.
    ///
    /// Matches the eight-entry table of the reference SP design.
    pub const BTB_SIZE: usize = 8;

    /// Words per SRAM.
    pub const SRAM_HEIGHT: usize = super::SRAM_HEIGHT;

    /// Directory trace files are written to.
    pub const TRACE_DIR: &str = ".";

    /// Instruction trace file name.
    pub const INST_TRACE_FILE: &str = "inst_trace.txt";

    /// Per-cycle state trace file name.
    pub const CYCLE_TRACE_FILE: &str = "cycle_trace.txt";

    /// DMA activity trace file name.
    pub const DMA_TRACE_FILE: &str = "dma_trace.txt";

    /// Instruction memory dump file name.
    pub const SRAMI_DUMP_FILE: &str = "srami_out.txt";

    /// Data memory dump file name.
    pub const SRAMD_DUMP_FILE: &str = "sramd_out.txt";
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use sp_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 5000 },
///     "pipeline": { "btb_size": 16 },
///     "trace": { "enabled": false }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, Some(5000));
/// assert_eq!(config.pipeline.btb_size, 16);
/// assert_eq!(config.memory.sram_height, 64 * 1024);
/// assert!(!config.trace.enabled);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline and branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// SRAM geometry
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Trace and dump file output
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parses a configuration document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the document is not valid JSON for this
    /// schema or fails [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a buildable machine.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] naming the first inconsistent field.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.pipeline.btb_size == 0 {
            return Err(SimError::Config("pipeline.btb_size must be non-zero".into()));
        }
        if self.memory.sram_height == 0 || self.memory.sram_height > SRAM_HEIGHT {
            return Err(SimError::Config(format!(
                "memory.sram_height must be in 1..={SRAM_HEIGHT}, got {}",
                self.memory.sram_height
            )));
        }
        if self.general.max_cycles == Some(0) {
            return Err(SimError::Config("general.max_cycles must be non-zero".into()));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Stop with [`SimError::CycleLimit`] after this many cycles (unbounded if unset).
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Branch Target Buffer entries; the index is `pc % btb_size`.
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,
}

impl PipelineConfig {
    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            btb_size: defaults::BTB_SIZE,
        }
    }
}

/// SRAM configuration shared by the instruction and data memories.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Words per SRAM; the image is truncated to this many lines.
    #[serde(default = "MemoryConfig::default_sram_height")]
    pub sram_height: usize,
}

impl MemoryConfig {
    fn default_sram_height() -> usize {
        defaults::SRAM_HEIGHT
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            sram_height: defaults::SRAM_HEIGHT,
        }
    }
}

/// Trace and memory-dump output settings.
///
/// Traces are write-only byproducts; disabling them never changes simulated behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Master switch for every trace and dump file.
    #[serde(default = "TraceConfig::default_enabled")]
    pub enabled: bool,

    /// Directory receiving the files.
    #[serde(default = "TraceConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// Write the per-instruction trace.
    #[serde(default = "TraceConfig::default_enabled")]
    pub instructions: bool,

    /// Write the per-cycle state trace.
    #[serde(default = "TraceConfig::default_enabled")]
    pub cycles: bool,

    /// Write the DMA activity trace.
    #[serde(default = "TraceConfig::default_enabled")]
    pub dma: bool,

    /// Dump both SRAMs when the program halts.
    #[serde(default = "TraceConfig::default_enabled")]
    pub dump_memory: bool,
}

impl TraceConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from(defaults::TRACE_DIR)
    }

    /// A configuration with every output switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Path of the instruction trace file.
    pub fn inst_trace_path(&self) -> PathBuf {
        self.output_dir.join(defaults::INST_TRACE_FILE)
    }

    /// Path of the cycle trace file.
    pub fn cycle_trace_path(&self) -> PathBuf {
        self.output_dir.join(defaults::CYCLE_TRACE_FILE)
    }

    /// Path of the DMA trace file.
    pub fn dma_trace_path(&self) -> PathBuf {
        self.output_dir.join(defaults::DMA_TRACE_FILE)
    }

    /// Path of the instruction memory dump.
    pub fn srami_dump_path(&self) -> PathBuf {
        self.output_dir.join(defaults::SRAMI_DUMP_FILE)
    }

    /// Path of the data memory dump.
    pub fn sramd_dump_path(&self) -> PathBuf {
        self.output_dir.join(defaults::SRAMD_DUMP_FILE)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from(defaults::TRACE_DIR),
            instructions: true,
            cycles: true,
            dma: true,
            dump_memory: true,
        }
    }
}
