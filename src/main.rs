//! rfclk - RF clock synthesizer register programmer
//!
//! Pushes pre-computed register images to the clock chips of an RF
//! data-converter board over I2C.
//!
//! # Architecture
//!
//! rfclk drives two chip families through an SC18IS602 I2C-to-SPI bridge:
//! - **LMK04208** jitter cleaner - the configuration routine owns its own
//!   bus handle
//! - **LMX2594** synthesizers - the programmer opens the bus, force-binds the
//!   bridge address and releases the handle itself
//!
//! The process exits with the library status code: `0` on success, `1` if
//! the bridge address could not be bound.

mod backends;
mod cli;
mod error;
mod regfile;

use clap::Parser;
use cli::{Cli, Commands, TargetArgs};
use error::CliError;
use rfclk_core::bus::BusId;
use rfclk_core::regs::{Lmk04208Regs, Lmx2594Regs};

fn main() {
    let cli = Cli::parse();

    // Initialize logger, -v/-vv raise the default filter
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();

    let result = match cli.command {
        Commands::Lmk04208 { target } => program(&target, |words| {
            Ok(backends::Job::Lmk04208(Lmk04208Regs::try_from(words)?))
        }),
        Commands::Lmx2594 { target } => program(&target, |words| {
            Ok(backends::Job::Lmx2594(Lmx2594Regs::try_from(words)?))
        }),
        Commands::ListBackends => {
            print!("{}", backends::backend_help());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Default log filter for a verbosity count
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Load the register file, build the job and run it on the selected backend
fn program(
    target: &TargetArgs,
    build: impl FnOnce(&[u32]) -> Result<backends::Job, CliError>,
) -> Result<(), CliError> {
    let words = regfile::load_words(&target.regs)?;
    let job = build(&words)?;
    backends::run_job(&target.backend, BusId(target.bus), &job)
}
