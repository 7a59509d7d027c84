//! Bus backend registration and dispatch
//!
//! This module provides a registry of the bus backends compiled into the
//! binary and runs a programming job on the one named on the command line.
//! Backend strings follow the `name[:key=value,...]` form.

use rfclk_core::bridge::{BridgeJitterCleaner, BridgeSynthesizer};
use rfclk_core::bus::{BusId, I2cBus};
use rfclk_core::programmer::{Lmk04208Programmer, Lmx2594Programmer};
use rfclk_core::regs::{Lmk04208Regs, Lmx2594Regs};

use crate::error::CliError;

/// Information about a backend
pub struct BackendInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available backends (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_backends() -> Vec<BackendInfo> {
    let mut backends = Vec::new();

    #[cfg(feature = "linux-i2c")]
    backends.push(BackendInfo {
        name: "linux_i2c",
        aliases: &["linux-i2c", "i2cdev"],
        description: "Linux i2c-dev interface (root=<dir holding i2c-N nodes>)",
    });

    #[cfg(feature = "dummy")]
    backends.push(BackendInfo {
        name: "dummy",
        aliases: &[],
        description: "Recording bus, prints frames (fail_open=1,fail_bind=1,fail_write=<n>)",
    });

    backends
}

/// Generate help text listing all available backends
pub fn backend_help() -> String {
    let backends = available_backends();

    if backends.is_empty() {
        return "No backends available (recompile with backend features enabled)".to_string();
    }

    let mut help = String::from("Available backends:\n");
    for b in &backends {
        help.push_str(&format!("  {:12} - {}\n", b.name, b.description));
        if !b.aliases.is_empty() {
            help.push_str(&format!("  {:12}   aliases: {}\n", "", b.aliases.join(", ")));
        }
    }
    help
}

/// Generate a short list of backend names for CLI help
pub fn backend_names_short() -> String {
    let backends = available_backends();
    let names: Vec<&str> = backends.iter().map(|b| b.name).collect();
    names.join(", ")
}

/// Resolve a backend name or alias to its primary name
pub fn find_backend(name: &str) -> Option<&'static str> {
    available_backends()
        .into_iter()
        .find(|b| b.name == name || b.aliases.contains(&name))
        .map(|b| b.name)
}

/// Split a backend string into name and key/value options
pub fn parse_backend_string(s: &str) -> (&str, Vec<(&str, &str)>) {
    let (name, rest) = match s.split_once(':') {
        Some((name, rest)) => (name, rest),
        None => (s, ""),
    };
    let options = rest
        .split(',')
        .filter(|opt| !opt.is_empty())
        .map(|opt| opt.split_once('=').unwrap_or((opt, "")))
        .collect();
    (name, options)
}

/// A programming job for one chip
pub enum Job {
    /// LMK04208 jitter cleaner image
    Lmk04208(Lmk04208Regs),
    /// LMX2594 synthesizer image
    Lmx2594(Lmx2594Regs),
}

/// Run `job` on `bus` over the bus built from `backend`
pub fn run_job(backend: &str, bus: BusId, job: &Job) -> Result<(), CliError> {
    let (name, options) = parse_backend_string(backend);
    let canonical = find_backend(name).ok_or_else(|| CliError::UnknownBackend {
        name: name.to_string(),
        available: backend_names_short(),
    })?;

    log::debug!("Using backend {} ({:?})", canonical, options);

    match canonical {
        #[cfg(feature = "linux-i2c")]
        "linux_i2c" => {
            let config = parse_linux_options(&options)?;
            run_on(rfclk_linux_i2c::LinuxI2c::new(config), bus, job)
        }
        #[cfg(feature = "dummy")]
        "dummy" => {
            let config = parse_dummy_options(&options)?;
            let dummy = rfclk_dummy::DummyBus::new(config);
            let result = run_on(dummy.clone(), bus, job);
            for t in dummy.transactions() {
                println!("{}", format_transaction(&t));
            }
            result
        }
        _ => unreachable!("find_backend returned an unregistered name"),
    }
}

fn run_on<B: I2cBus>(bus: B, bus_id: BusId, job: &Job) -> Result<(), CliError> {
    match job {
        Job::Lmk04208(regs) => {
            Lmk04208Programmer::new(BridgeJitterCleaner::new(bus)).program(bus_id, regs)?
        }
        Job::Lmx2594(regs) => {
            Lmx2594Programmer::new(bus, BridgeSynthesizer::new()).program(bus_id, regs)?
        }
    }
    Ok(())
}

#[cfg(feature = "linux-i2c")]
fn parse_linux_options(
    options: &[(&str, &str)],
) -> Result<rfclk_linux_i2c::LinuxI2cConfig, CliError> {
    let mut config = rfclk_linux_i2c::LinuxI2cConfig::new();
    for (key, value) in options {
        match *key {
            "root" => config = config.with_dev_root(*value),
            _ => log::warn!("linux_i2c: Unknown option: {}={}", key, value),
        }
    }
    Ok(config)
}

#[cfg(feature = "dummy")]
fn parse_dummy_options(options: &[(&str, &str)]) -> Result<rfclk_dummy::DummyConfig, CliError> {
    let flag = |key: &str, value: &str| match value {
        "" | "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(CliError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        }),
    };

    let mut config = rfclk_dummy::DummyConfig::default();
    for &(key, value) in options {
        match key {
            "fail_open" => config.fail_open = flag(key, value)?,
            "fail_bind" => config.fail_bind = flag(key, value)?,
            "fail_write" => {
                let n = value.parse().map_err(|_| CliError::InvalidOption {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                config.fail_write_at = Some(n);
            }
            _ => log::warn!("dummy: Unknown option: {}={}", key, value),
        }
    }
    Ok(config)
}

#[cfg(feature = "dummy")]
fn format_transaction(t: &rfclk_dummy::Transaction) -> String {
    use rfclk_dummy::Transaction;

    match t {
        Transaction::Open(path) => format!("open  {}", path),
        Transaction::Bind { addr, mode } => format!("bind  {} {:?}", addr, mode),
        Transaction::Write(bytes) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
            format!("write {}", hex.join(" "))
        }
        Transaction::Delay(us) => format!("delay {} us", us),
        Transaction::Close(path) => format!("close {}", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_string() {
        assert_eq!(parse_backend_string("dummy"), ("dummy", vec![]));
        assert_eq!(
            parse_backend_string("dummy:fail_bind=1,fail_write=3"),
            ("dummy", vec![("fail_bind", "1"), ("fail_write", "3")])
        );
        assert_eq!(
            parse_backend_string("linux_i2c:root=/tmp/dev"),
            ("linux_i2c", vec![("root", "/tmp/dev")])
        );
        assert_eq!(
            parse_backend_string("dummy:fail_open"),
            ("dummy", vec![("fail_open", "")])
        );
    }

    #[cfg(feature = "linux-i2c")]
    #[test]
    fn test_find_backend_alias() {
        assert_eq!(find_backend("i2cdev"), Some("linux_i2c"));
        assert_eq!(find_backend("linux_i2c"), Some("linux_i2c"));
        assert_eq!(find_backend("spidev"), None);
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_dummy_bind_failure_exit_code() {
        let job = Job::Lmx2594(Lmx2594Regs::new([0; 113]));
        let err = run_job("dummy:fail_bind=1", BusId(5), &job).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_dummy_bad_option() {
        let job = Job::Lmk04208(Lmk04208Regs::new([0; 26]));
        let err = run_job("dummy:fail_write=x", BusId(5), &job).unwrap_err();
        assert!(matches!(err, CliError::InvalidOption { .. }));
    }

    #[test]
    fn test_unknown_backend() {
        let job = Job::Lmk04208(Lmk04208Regs::new([0; 26]));
        let err = run_job("ch341a", BusId(5), &job).unwrap_err();
        assert!(matches!(err, CliError::UnknownBackend { .. }));
    }
}
