//! Logging setup for applications embedding the resolver.
//!
//! Both crates of this workspace log through facades (`tracing` here, `log`
//! in `radiodns-bearer`); nothing is printed until an application installs
//! a subscriber, for example with [`init_logging`].

use std::io;

use chrono::Local;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a console subscriber and bridge `log` records into it.
///
/// `RUST_LOG` takes precedence over `level` when set. Fails without
/// installing anything if a global subscriber or `log` logger is already in
/// place.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if tracing::dispatcher::has_been_set() {
        return Err("Failed to set default subscriber: already set".into());
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_timer(LocalTimeTimer),
    );

    // radiodns-bearer logs through the log crate
    tracing_log::LogTracer::init().map_err(|e| format!("Failed to initialize LogTracer: {}", e))?;

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set default subscriber: {}", e))?;

    Ok(())
}

/// Local-time timestamps with microseconds.
#[derive(Debug, Clone, Copy)]
struct LocalTimeTimer;

impl fmt::time::FormatTime for LocalTimeTimer {
    fn format_time(&self, w: &mut fmt::format::Writer) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.6f"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        let _ = init_logging("debug");
        assert!(tracing::dispatcher::has_been_set());
        let err = init_logging("debug").unwrap_err();
        assert!(err.to_string().starts_with("Failed to set default subscriber"));
    }

    #[test]
    fn test_invalid_level() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(init_logging("radiodns=loud").is_err());
        }
    }

    #[test]
    fn test_timer_format() {
        let mut out = String::new();
        let mut writer = fmt::format::Writer::new(&mut out);
        fmt::time::FormatTime::format_time(&LocalTimeTimer, &mut writer).unwrap();
        // 2026-01-01T00:00:00.000000
        assert_eq!(out.len(), 26);
        assert_eq!(&out[10..11], "T");
    }
}
