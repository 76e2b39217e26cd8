//! LS-8 emulator binary.
//!
//! Loads a `.ls8` program image, runs it, and prints console output on
//! stdout. Diagnostics go to stderr; set `RUST_LOG` to adjust them.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use emu_ls8::{Ls8Config, Machine};

#[derive(Parser, Debug)]
#[command(name = "emu-ls8")]
#[command(about = "LS-8 8-bit machine emulator", version)]
struct Args {
    /// Program image (.ls8) to load at address 0
    program: PathBuf,

    /// Timer interrupt period in milliseconds
    #[arg(long, default_value_t = 1000)]
    timer_ms: u64,

    /// Run without the timer device
    #[arg(long)]
    no_timer: bool,

    /// Print a trace line to stderr before every instruction
    #[arg(long)]
    trace: bool,

    /// Stop after this many instructions
    #[arg(long)]
    max_instructions: Option<u64>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Ls8Config {
        timer_period: if args.no_timer {
            None
        } else {
            Some(Duration::from_millis(args.timer_ms))
        },
    };

    let mut machine = Machine::new(&config);
    machine.load_file(&args.program)?;

    if args.trace || args.max_instructions.is_some() {
        while !machine.cpu().is_halted() {
            if let Some(limit) = args.max_instructions {
                if machine.cpu().instructions() >= limit {
                    info!(limit, "instruction limit reached");
                    break;
                }
            }
            if args.trace {
                eprintln!("{}", machine.trace_line());
            }
            machine.step()?;
        }
    } else {
        machine.run()?;
    }

    Ok(())
}
