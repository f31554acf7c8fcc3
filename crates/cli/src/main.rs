//! SP pipeline simulator CLI.
//!
//! This binary runs one memory image to completion. It performs:
//! 1. **Configuration:** Built-in defaults, optionally overridden by a JSON document and flags.
//! 2. **Loading:** Reads the image (one hex word per line) into both SRAMs.
//! 3. **Simulation:** Ticks until `HLT` commits, then prints the statistics summary.

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sp_core::{Config, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sp",
    author,
    version,
    about = "SP 6-stage pipelined processor simulator",
    long_about = "Run an SP memory image until HLT.\n\nTrace files (inst_trace.txt, cycle_trace.txt, dma_trace.txt) and memory dumps\n(srami_out.txt, sramd_out.txt) are written to the trace directory.\n\nExamples:\n  sp program.txt\n  sp program.txt --trace-dir out --max-cycles 100000\n  sp program.txt --config sp.json --no-trace"
)]
struct Cli {
    /// Memory image: one 32-bit hex word per line.
    program: PathBuf,

    /// JSON configuration document.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for trace and dump files.
    #[arg(long)]
    trace_dir: Option<PathBuf>,

    /// Disable every trace and dump file.
    #[arg(long)]
    no_trace: bool,

    /// Stop with an error after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        println!("{e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "sp_core=debug,info",
        _ => "sp_core=trace,debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configuration from defaults, the optional JSON file and flags.
fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    if let Some(dir) = &cli.trace_dir {
        config.trace.output_dir.clone_from(dir);
    }
    if cli.no_trace {
        config.trace.enabled = false;
    }
    if cli.max_cycles.is_some() {
        config.general.max_cycles = cli.max_cycles;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let config = load_config(cli)?;
    info!(
        program = %cli.program.display(),
        btb_size = config.pipeline.btb_size,
        trace = config.trace.enabled,
        "starting simulation"
    );
    let mut sim = Simulator::from_file(config, &cli.program)?;

    let outcome = sim.run().map(|_| ());
    if outcome.is_err() {
        println!("\n[!] stopped at cycle {}", sim.cycle());
        print!("{}", sim.state().regs);
    }
    sim.stats().print();
    outcome
}
