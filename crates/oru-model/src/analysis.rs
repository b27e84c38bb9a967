//! Classified results and the group → diagnostic → metric tree.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patient::PersonalDetails;

/// Three-valued risk outcome of a result against one reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtRisk {
    /// The result is outside the range.
    Yes,
    /// The result is inside the range, or no range is defined.
    No,
    /// A qualified result could lie on either side of a bound.
    Possible,
}

impl AtRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtRisk::Yes => "Yes",
            AtRisk::No => "No",
            AtRisk::Possible => "Possible",
        }
    }
}

impl fmt::Display for AtRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A matched result after classification against both reference ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedMetric {
    pub metric_name: String,
    pub metric_unit: String,
    pub metric_standard_lower: Option<f64>,
    pub metric_standard_higher: Option<f64>,
    pub metric_everlab_lower: Option<f64>,
    pub metric_everlab_higher: Option<f64>,
    pub condition_name: Option<String>,
    pub diagnostic_name: Option<String>,
    /// Rendered result, e.g. `85` or `< 0.1`.
    pub result_value: String,
    pub standard_at_risk: AtRisk,
    pub everlab_at_risk: AtRisk,
    /// Groups of the owning diagnostic. Consumed by aggregation.
    #[serde(skip)]
    pub group_names: Vec<String>,
}

/// Leaf of the analysis tree: a classified metric placed under one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricLeaf {
    #[serde(flatten)]
    pub metric: ClassifiedMetric,
    pub group_name: String,
}

/// Group name → diagnostic name → leaves in report order.
pub type AnalysisTree = BTreeMap<String, BTreeMap<String, Vec<MetricLeaf>>>;

/// Result of analysing one lab report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub personal_details: PersonalDetails,
    pub data: AnalysisTree,
}

/// Items filtered out on the way from message to tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropSummary {
    /// Observations with a supported value type that could not be read.
    pub skipped_observations: usize,
    /// Results no catalog metric fits.
    pub unmatched_results: usize,
    /// Matched metrics whose diagnostic has no group to nest under.
    pub groupless_metrics: usize,
}

impl DropSummary {
    pub fn total(&self) -> usize {
        self.skipped_observations + self.unmatched_results + self.groupless_metrics
    }
}
