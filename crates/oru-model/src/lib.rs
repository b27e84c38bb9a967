pub mod analysis;
pub mod error;
pub mod metric;
pub mod observation;
pub mod patient;

pub use analysis::{Analysis, AnalysisTree, AtRisk, ClassifiedMetric, DropSummary, MetricLeaf};
pub use error::{DecodeError, Result};
pub use metric::{Condition, Diagnostic, Group, Metric, MetricGender};
pub use observation::{Comparator, RawResult, ResultValue, format_number};
pub use patient::{Gender, PersonalDetails};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_serializes_with_camel_case_keys() {
        let analysis = Analysis {
            personal_details: PersonalDetails {
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                age: Some(40),
                gender: Some(Gender::Female),
            },
            data: AnalysisTree::new(),
        };
        let json = serde_json::to_value(&analysis).expect("serialize analysis");
        assert_eq!(json["personalDetails"]["firstName"], "Jane");
        assert_eq!(json["personalDetails"]["gender"], "Female");
        assert!(json["data"].as_object().unwrap().is_empty());
    }
}
