//! CLI argument definitions.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use oru_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "oru-analyse",
    version,
    about = "Lab report risk analysis - Classify ORU results against reference ranges",
    long_about = "Analyse an ORU lab report against a metric catalog.\n\n\
                  Each result is matched to a reference metric for the patient's age and\n\
                  gender and classified as at risk (Yes / No / Possible) against the\n\
                  standard and everlab ranges."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-identifying values (names) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging options. `--log-level` wins over `-v`/`-q`, and either one
    /// disables the `RUST_LOG` override.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
            },
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse a lab report and print the group / diagnostic / metric tree.
    Analyse(AnalyseArgs),

    /// List the metrics in the catalog.
    Metrics(CatalogArgs),
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Catalog directory with diagnostic_metrics.csv and conditions.csv
    /// (default: $ORU_CATALOG_DIR, then ./catalog).
    #[arg(long = "catalog", value_name = "DIR")]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser)]
pub struct AnalyseArgs {
    /// Path to the ORU message file.
    #[arg(value_name = "MESSAGE_FILE")]
    pub message: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Compute the patient's age at this date (YYYY-MM-DD) instead of today.
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn defaults_follow_rust_log_at_warn() {
        let config = parse(&["oru-analyse", "metrics"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.log_data);
    }

    #[test]
    fn explicit_level_overrides_verbosity() {
        let cli = parse(&["oru-analyse", "-v", "metrics", "--log-level", "trace"]);
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(!config.use_env_filter);

        let config = parse(&["oru-analyse", "-vv", "metrics"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn log_file_and_data_flags() {
        let cli = parse(&[
            "oru-analyse",
            "analyse",
            "report.txt",
            "--log-file",
            "run.log",
            "--log-format",
            "json",
            "--log-data",
            "--as-of",
            "2024-01-15",
        ]);
        let config = cli.log_config();
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.log_data);
        assert!(!config.with_ansi);
        let Command::Analyse(args) = cli.command else {
            panic!("expected analyse");
        };
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 1, 15));
    }
}
