//! Association of raw results with catalog metrics.
//!
//! A result matches a metric when all of the following hold:
//!
//! - the reported code is one of the metric's codes
//! - the reported unit is one of the metric's units, or the metric has no
//!   units and the result was reported without one
//! - the patient's age is within the metric's bounds (an unknown age or an
//!   absent bound never excludes)
//! - the metric applies to any gender or to the patient's gender
//!
//! The first matching metric in catalog order wins; there is no scoring.

use oru_model::{Metric, PersonalDetails, RawResult};
use tracing::debug;

/// A result paired with the metric it was matched to.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedResult<'a> {
    pub result: RawResult,
    pub metric: &'a Metric,
}

/// Outcome of matching one result.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched(MatchedResult<'a>),
    /// No catalog metric fits; the result is left out of the analysis.
    Unmatched(RawResult),
}

impl<'a> MatchOutcome<'a> {
    pub fn matched(self) -> Option<MatchedResult<'a>> {
        match self {
            MatchOutcome::Matched(matched) => Some(matched),
            MatchOutcome::Unmatched(_) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// Matches every result against the catalog, preserving result order.
pub fn match_results<'a>(
    results: Vec<RawResult>,
    details: &PersonalDetails,
    catalog: &'a [Metric],
) -> Vec<MatchOutcome<'a>> {
    results
        .into_iter()
        .map(|result| {
            match catalog.iter().find(|metric| metric_fits(metric, &result, details)) {
                Some(metric) => MatchOutcome::Matched(MatchedResult { result, metric }),
                None => {
                    debug!(
                        code = %result.oru_sonic_code,
                        unit = %result.oru_sonic_unit,
                        "no metric matches result"
                    );
                    MatchOutcome::Unmatched(result)
                }
            }
        })
        .collect()
}

/// Returns true if `metric` applies to `result` for this patient.
pub fn metric_fits(metric: &Metric, result: &RawResult, details: &PersonalDetails) -> bool {
    code_matches(metric, result)
        && unit_matches(metric, result)
        && age_matches(metric, details.age)
        && metric.gender.admits(details.gender)
}

fn code_matches(metric: &Metric, result: &RawResult) -> bool {
    metric.oru_sonic_codes.contains(&result.oru_sonic_code)
}

fn unit_matches(metric: &Metric, result: &RawResult) -> bool {
    metric.oru_sonic_units.contains(&result.oru_sonic_unit)
        || (metric.oru_sonic_units.is_empty() && result.oru_sonic_unit.trim().is_empty())
}

fn age_matches(metric: &Metric, age: Option<u32>) -> bool {
    let Some(age) = age else {
        return true;
    };
    metric.min_age.is_none_or(|min| age >= min) && metric.max_age.is_none_or(|max| age <= max)
}
