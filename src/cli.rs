//! CLI argument parsing

use crate::backends;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate dynamic help text for the backend argument
fn backend_help() -> String {
    format!(
        "Bus backend to use [available: {}]",
        backends::backend_names_short()
    )
}

#[derive(Parser)]
#[command(name = "rfclk")]
#[command(author, version, about = "RF clock synthesizer register programmer", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the programming commands
#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// I2C bus number (/dev/i2c-<N>)
    #[arg(short, long)]
    pub bus: u32,

    /// Register word file (decimal or 0x hex words, in write order)
    #[arg(short, long)]
    pub regs: PathBuf,

    /// Bus backend, optionally with options (name:key=value,...)
    #[arg(short = 'B', long, default_value = "linux_i2c", help = backend_help())]
    pub backend: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Program the LMK04208 jitter cleaner (26 words)
    #[command(alias = "clock-a")]
    Lmk04208 {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Program the LMX2594 synthesizers (113 words)
    #[command(alias = "clock-b")]
    Lmx2594 {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List available bus backends
    ListBackends,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lmx2594() {
        let cli = Cli::try_parse_from([
            "rfclk", "-v", "lmx2594", "--bus", "5", "--regs", "r.txt", "-B", "dummy",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Lmx2594 { target } => {
                assert_eq!(target.bus, 5);
                assert_eq!(target.regs, PathBuf::from("r.txt"));
                assert_eq!(target.backend, "dummy");
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_default_backend() {
        let cli = Cli::try_parse_from(["rfclk", "clock-a", "-b", "1", "-r", "r.txt"]).unwrap();
        match cli.command {
            Commands::Lmk04208 { target } => assert_eq!(target.backend, "linux_i2c"),
            _ => panic!("wrong subcommand"),
        }
    }
}
