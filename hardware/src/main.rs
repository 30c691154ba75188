//! Y86 Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It parses the command line, loads
//! the configuration and the `.yo` program, clocks the pipeline until the
//! program halts or faults, and reports the cycle count and statistics.
//!
//! # Exit codes
//!
//! * `0` - the program halted
//! * `1` - the program faulted, or could not be loaded or configured
//! * `2` - the configured cycle limit was reached

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use yess::common::error::{LoadError, SimError, Status};
use yess::config::Config;
use yess::core::Cpu;

/// Command-line arguments for the Y86 pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Y86 Five-Stage Pipeline Simulator")]
struct Args {
    /// Program listing produced by the assembler (`.yo`).
    file: PathBuf,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every pipeline stage of every cycle.
    #[arg(short, long)]
    trace: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    stats_json: bool,
}

/// Main entry point for the Y86 pipeline simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and the optional TOML file.
/// 2. **Logging**: Initializes `env_logger`, defaulting to `trace` when
///    tracing is requested and `warn` otherwise.
/// 3. **Loader**: Loads the listing; on failure prints the error and a
///    memory dump and exits without running.
/// 4. **Simulation Loop**: Ticks the CPU until Writeback terminates it.
/// 5. **Teardown**: Prints the cycle count and statistics.
fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("{}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };
    config.general.trace_instructions |= args.trace;
    config.output.stats_json |= args.stats_json;

    let default_filter = if config.general.trace_instructions {
        "trace"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let mut cpu = Cpu::new(&config);

    if let Err(e) = cpu.load_program(&args.file) {
        println!("{}", e);
        if matches!(e, LoadError::FileName(_)) {
            println!(" usage: yess <filename>.yo");
        }
        if let Err(e) = cpu.mem.dump(&mut io::stdout()) {
            error!("memory dump failed: {}", e);
        }
        process::exit(1);
    }

    let result = cpu.run();
    println!("\nTotal clock cycles = {}", cpu.stats.cycles);

    if config.output.stats_json {
        match cpu.stats.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("could not serialize statistics: {}", e),
        }
    } else if config.output.print_stats {
        if let Err(e) = cpu.stats.print(&mut io::stdout()) {
            error!("could not print statistics: {}", e);
        }
    }
    io::stdout().flush().ok();

    let code = match result {
        Ok(Status::Hlt) | Ok(Status::Aok) => 0,
        Ok(Status::Adr) | Ok(Status::Ins) => 1,
        Err(SimError::CycleLimit(limit)) => {
            eprintln!("[!] stopped after {} cycles without halting", limit);
            2
        }
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            1
        }
    };
    process::exit(code);
}
