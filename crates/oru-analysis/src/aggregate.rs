//! Reshaping classified metrics into the group → diagnostic → metric tree.

use oru_model::{AnalysisTree, ClassifiedMetric, MetricLeaf};
use tracing::debug;

/// The tree plus the metrics that had no group to nest under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub tree: AnalysisTree,
    pub groupless: Vec<ClassifiedMetric>,
}

/// Places each metric under every group of its diagnostic.
///
/// A metric in groups `A` and `B` appears under both. Within a diagnostic,
/// leaves keep the order of `classified`.
pub fn aggregate(classified: Vec<ClassifiedMetric>) -> Aggregation {
    let mut aggregation = Aggregation::default();
    for metric in classified {
        if metric.group_names.is_empty() {
            debug!(metric = %metric.metric_name, "metric has no group");
            aggregation.groupless.push(metric);
            continue;
        }
        let diagnostic = metric.diagnostic_name.clone().unwrap_or_default();
        for group_name in &metric.group_names {
            aggregation
                .tree
                .entry(group_name.clone())
                .or_default()
                .entry(diagnostic.clone())
                .or_default()
                .push(MetricLeaf {
                    metric: metric.clone(),
                    group_name: group_name.clone(),
                });
        }
    }
    aggregation
}
