use std::fs::{File, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::settings::Settings;

/// Where log lines end up.
#[derive(Debug)]
enum LogSink {
    File(File),
    Stderr,
    Discard,
}

/// The log file when it can be opened. Otherwise stderr, unless a TUI owns
/// the terminal, in which case lines are dropped.
fn choose_sink(log_path: &Path, interactive: bool) -> LogSink {
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => LogSink::File(file),
        Err(_) if interactive => LogSink::Discard,
        Err(_) => LogSink::Stderr,
    }
}

/// Route the `log` facade to `<data_dir>/paylog.log`. `RUST_LOG` overrides
/// the configured level.
pub fn init(settings: &Settings, interactive: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(settings.log_level.as_str()));
    builder.format_timestamp_secs();

    let target = match choose_sink(&settings.log_path(), interactive) {
        LogSink::File(file) => Target::Pipe(Box::new(file)),
        LogSink::Stderr => Target::Stderr,
        LogSink::Discard => Target::Pipe(Box::new(std::io::sink())),
    };
    builder.target(target);

    // A second init (tests, repeated calls) keeps the first logger.
    let _ = builder.try_init();
}
