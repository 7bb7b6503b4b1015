//! Common utilities for dynarr-cmd

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record};

/// Writes log records to stderr as `[LEVEL target] message`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Maps the `-v` count to a level filter: warnings by default, debug for
/// `-v`, trace for `-vv` and above.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the stderr logger. Fails if a logger was already installed.
pub fn init_logger(verbose: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
    log::set_max_level(level_for_verbosity(verbose));
    log::debug!("log level set to {}", log::max_level());
    Ok(())
}

/// Formats a slice of displayable values as `[a, b, c]`.
pub fn format_values<T: std::fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}
