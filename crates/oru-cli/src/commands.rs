use std::path::PathBuf;

use anyhow::{Context, Result};
use oru_analysis::{AnalysisOptions, AnalysisOutcome, analyse};
use oru_catalog::{CsvCatalog, MetricCatalog, default_catalog_dir};
use oru_cli::logging::redact_value;
use oru_cli::summary::{metrics_table, print_analysis};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info_span};

use crate::cli::{AnalyseArgs, CatalogArgs, OutputFormatArg};

pub fn run_analyse(args: &AnalyseArgs) -> Result<()> {
    let _span = info_span!("run_analyse", message = %args.message.display()).entered();
    let message = std::fs::read_to_string(&args.message)
        .with_context(|| format!("read message {}", args.message.display()))?;
    let catalog = open_catalog(&args.catalog);
    let mut options = AnalysisOptions::default();
    if let Some(date) = args.as_of {
        options = options.as_of(date);
    }

    let outcome: AnalysisOutcome = runtime()?
        .block_on(analyse(&message, &catalog, &options))
        .context("analyse lab report")?;
    let details = &outcome.analysis.personal_details;
    debug!(
        first_name = redact_value(details.first_name.as_deref().unwrap_or_default()),
        last_name = redact_value(details.last_name.as_deref().unwrap_or_default()),
        age = ?details.age,
        "analysed report"
    );

    match args.format {
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&outcome.analysis)
                .context("serialize analysis")?;
            println!("{json}");
        }
        OutputFormatArg::Table => print_analysis(&outcome),
    }
    Ok(())
}

pub fn run_metrics(args: &CatalogArgs) -> Result<()> {
    let catalog = open_catalog(args);
    let metrics = runtime()?
        .block_on(catalog.metrics())
        .with_context(|| format!("load catalog from {}", catalog.dir().display()))?;
    println!("{}", metrics_table(&metrics));
    Ok(())
}

fn open_catalog(args: &CatalogArgs) -> CsvCatalog {
    let dir: PathBuf = args.catalog.clone().unwrap_or_else(default_catalog_dir);
    CsvCatalog::from_dir(dir)
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .build()
        .context("start async runtime")
}
