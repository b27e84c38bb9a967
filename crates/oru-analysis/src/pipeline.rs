//! End-to-end analysis of one lab report.
//!
//! decode → extract → fetch catalog → match → classify → aggregate
//!
//! The catalog fetch is the only suspension point. Each call builds its own
//! records, results and tree; nothing is shared between analyses.

use chrono::NaiveDate;
use oru_catalog::MetricCatalog;
use oru_ingest::{Extraction, decode, extract, extract_as_of};
use oru_model::{Analysis, DropSummary, Metric};
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span};

use crate::aggregate::aggregate;
use crate::classify::classify_match;
use crate::error::{AnalysisError, Result};
use crate::matcher::{MatchOutcome, match_results};

/// Options for a single analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Date the patient's age is computed at. Defaults to today.
    ///
    /// Age-bounded metrics make the result depend on this date.
    pub as_of: Option<NaiveDate>,
}

impl AnalysisOptions {
    #[must_use]
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}

/// An analysis with the counts of everything left out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub dropped: DropSummary,
}

/// Analyses a raw lab report against the catalog.
///
/// # Errors
///
/// Fails if the message cannot be decoded or the catalog cannot be loaded.
/// Results that match no metric are dropped, not reported as errors.
pub async fn analyse<C: MetricCatalog>(
    message: &str,
    catalog: &C,
    options: &AnalysisOptions,
) -> Result<AnalysisOutcome> {
    let span = info_span!("analyse", message_bytes = message.len());
    async {
        let decoded = decode(message)?;
        let extraction = match options.as_of {
            Some(date) => extract_as_of(decoded.records(), date),
            None => extract(decoded.records()),
        };
        let metrics = catalog.metrics().await?;
        debug!(metric_count = metrics.len(), "fetched catalog");
        Ok::<_, AnalysisError>(analyse_extraction(extraction, &metrics))
    }
    .instrument(span)
    .await
}

/// Matches, classifies and aggregates extracted results. Pure and synchronous.
pub fn analyse_extraction(extraction: Extraction, metrics: &[Metric]) -> AnalysisOutcome {
    let Extraction {
        personal_details,
        results,
        skipped,
    } = extraction;

    let outcomes = match_results(results, &personal_details, metrics);
    let unmatched = outcomes.iter().filter(|o| !o.is_matched()).count();
    let classified = outcomes
        .into_iter()
        .filter_map(MatchOutcome::matched)
        .map(|matched| classify_match(&matched))
        .collect::<Vec<_>>();
    let matched = classified.len();
    let aggregation = aggregate(classified);

    let dropped = DropSummary {
        skipped_observations: skipped.len(),
        unmatched_results: unmatched,
        groupless_metrics: aggregation.groupless.len(),
    };
    info!(
        matched,
        groups = aggregation.tree.len(),
        skipped = dropped.skipped_observations,
        unmatched = dropped.unmatched_results,
        groupless = dropped.groupless_metrics,
        "analysis complete"
    );

    AnalysisOutcome {
        analysis: Analysis {
            personal_details,
            data: aggregation.tree,
        },
        dropped,
    }
}
