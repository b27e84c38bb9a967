//! Logging set-up using `tracing` and `tracing-subscriber`.
//!
//! The analysis crates only emit events; this module decides where they go.
//!
//! # Log Levels
//!
//! - `error`: the analysis failed
//! - `warn`: observations that were skipped
//! - `info`: catalog load and analysis summary counts
//! - `debug`: per-stage details, unmatched results
//! - `trace`: not used by the analysis crates
//!
//! Patient names only appear in logs when `--log-data` is given; otherwise
//! [`redact_value`] replaces them.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level.
const CRATES: [&str; 5] = [
    "oru_analysis",
    "oru_catalog",
    "oru_cli",
    "oru_ingest",
    "oru_model",
];

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when patient data logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Returns true if patient data logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when patient data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Logging options resolved from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Most verbose level emitted by the analysis crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Logs are appended here instead of written to stderr.
    pub log_file: Option<PathBuf>,
    /// Whether patient names may be logged.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, with span close events.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Installs the global subscriber writing to `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    tracing_subscriber::registry()
        .with(format_layer(config, writer).with_filter(filter))
        .init();
}

fn format_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .without_time()
            .with_ansi(config.with_ansi)
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.without_time().with_ansi(config.with_ansi).boxed(),
    }
}

/// Builds the filter: `RUST_LOG` when allowed and set, otherwise `level`
/// for our crates and `warn` for dependencies.
fn build_env_filter(level: LevelFilter, use_env_filter: bool) -> EnvFilter {
    if use_env_filter && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_format_writes_one_object_per_event() {
        let captured = Captured::default();
        let writer = captured.clone();
        let config = LogConfig {
            format: LogFormat::Json,
            ..LogConfig::default()
        };
        let subscriber =
            tracing_subscriber::registry().with(format_layer(&config, move || writer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(skipped = 1, "skipping observation");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let event: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(event["level"], "WARN");
        assert_eq!(event["fields"]["message"], "skipping observation");
        assert_eq!(event["fields"]["skipped"], 1);
    }

    #[test]
    fn default_directives_cover_every_crate() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,oru_analysis=debug,oru_catalog=debug,oru_cli=debug,oru_ingest=debug,oru_model=debug"
        );
        assert!(default_directives(LevelFilter::OFF).ends_with("oru_model=off"));
    }

    #[test]
    fn values_are_redacted_by_default() {
        assert!(!log_data_enabled());
        assert_eq!(redact_value("SMITH"), REDACTED_VALUE);
    }
}
