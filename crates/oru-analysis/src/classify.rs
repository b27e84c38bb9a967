//! Risk classification of a result against a reference range.
//!
//! Plain numeric results compare directly. Inequality-qualified results only
//! bound the true value from one side, so they are classified by this table
//! (`v` is the reported value, `L`/`H` the lower/higher limits, `-` an unset
//! limit):
//!
//! | result  | L   | H   | condition | outcome    |
//! |---------|-----|-----|-----------|------------|
//! | `< v`   | set | any | `v <= L`  | `Yes`      |
//! | `< v`   | -   | set | `v <= H`  | `No`       |
//! | `< v`   | -   | -   |           | `No`       |
//! | `< v`   |     |     | otherwise | `Possible` |
//! | `> v`   | any | set | `v >= H`  | `Yes`      |
//! | `> v`   | set | -   | `v >= L`  | `No`       |
//! | `> v`   | -   | -   |           | `No`       |
//! | `> v`   |     |     | otherwise | `Possible` |
//!
//! Comparisons against `NaN` are false, so a malformed value never panics:
//! numeric results classify as `No`, qualified results fall through to
//! `No` (no limits) or `Possible`.

use oru_model::{AtRisk, ClassifiedMetric, Comparator, ResultValue};

use crate::matcher::MatchedResult;

/// Classifies `result` against the range `[lower, higher]`.
pub fn classify(lower: Option<f64>, higher: Option<f64>, result: &ResultValue) -> AtRisk {
    match *result {
        ResultValue::Numeric { value } => {
            if lower.is_some_and(|l| value < l) || higher.is_some_and(|h| value > h) {
                AtRisk::Yes
            } else {
                AtRisk::No
            }
        }
        ResultValue::Qualified {
            comparator: Comparator::Less,
            value,
        } => match (lower, higher) {
            (Some(l), _) if value <= l => AtRisk::Yes,
            (None, Some(h)) if value <= h => AtRisk::No,
            (None, None) => AtRisk::No,
            _ => AtRisk::Possible,
        },
        ResultValue::Qualified {
            comparator: Comparator::Greater,
            value,
        } => match (lower, higher) {
            (_, Some(h)) if value >= h => AtRisk::Yes,
            (Some(l), None) if value >= l => AtRisk::No,
            (None, None) => AtRisk::No,
            _ => AtRisk::Possible,
        },
    }
}

/// Classifies a matched result against both of its metric's ranges.
pub fn classify_match(matched: &MatchedResult<'_>) -> ClassifiedMetric {
    let metric = matched.metric;
    let value = &matched.result.result;
    ClassifiedMetric {
        metric_name: metric.name.clone(),
        metric_unit: metric.display_unit().to_string(),
        metric_standard_lower: metric.standard_lower,
        metric_standard_higher: metric.standard_higher,
        metric_everlab_lower: metric.everlab_lower,
        metric_everlab_higher: metric.everlab_higher,
        condition_name: metric.condition_name().map(str::to_string),
        diagnostic_name: metric.diagnostic_name().map(str::to_string),
        result_value: value.to_string(),
        standard_at_risk: classify(metric.standard_lower, metric.standard_higher, value),
        everlab_at_risk: classify(metric.everlab_lower, metric.everlab_higher, value),
        group_names: metric
            .group_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
