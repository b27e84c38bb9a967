//! Tests for terminal rendering.

use std::collections::BTreeMap;

use oru_analysis::AnalysisOutcome;
use oru_cli::summary::{analysis_table, metrics_table, patient_line};
use oru_model::{
    Analysis, AtRisk, ClassifiedMetric, Diagnostic, DropSummary, Gender, Group, Metric,
    MetricGender, MetricLeaf, PersonalDetails,
};

fn glucose_leaf(group: &str) -> MetricLeaf {
    MetricLeaf {
        metric: ClassifiedMetric {
            metric_name: "Fasting Glucose".to_string(),
            metric_unit: "mg/dL".to_string(),
            metric_standard_lower: Some(70.0),
            metric_standard_higher: Some(110.0),
            metric_everlab_lower: Some(75.0),
            metric_everlab_higher: None,
            condition_name: None,
            diagnostic_name: Some("Blood Sugar".to_string()),
            result_value: "50".to_string(),
            standard_at_risk: AtRisk::Yes,
            everlab_at_risk: AtRisk::Possible,
            group_names: Vec::new(),
        },
        group_name: group.to_string(),
    }
}

fn outcome() -> AnalysisOutcome {
    let mut data = BTreeMap::new();
    for group in ["Metabolic", "General"] {
        data.insert(
            group.to_string(),
            BTreeMap::from([("Blood Sugar".to_string(), vec![glucose_leaf(group)])]),
        );
    }
    AnalysisOutcome {
        analysis: Analysis {
            personal_details: PersonalDetails {
                first_name: Some("JANE".to_string()),
                last_name: Some("SMITH".to_string()),
                age: Some(38),
                gender: Some(Gender::Female),
            },
            data,
        },
        dropped: DropSummary::default(),
    }
}

#[test]
fn patient_line_shows_known_details() {
    let details = &outcome().analysis.personal_details;
    insta::assert_snapshot!(patient_line(details), @"Patient: JANE SMITH | Age: 38 | Gender: Female");
    insta::assert_snapshot!(
        patient_line(&PersonalDetails::default()),
        @"Patient: - | Age: - | Gender: -"
    );
}

#[test]
fn analysis_table_has_a_row_per_leaf() {
    let mut table = analysis_table(&outcome());
    table.force_no_tty();
    assert_eq!(table.row_iter().count(), 2);
    let rendered = table.to_string();
    assert!(rendered.contains("General"), "{rendered}");
    assert!(rendered.contains("Metabolic"), "{rendered}");
    assert!(rendered.contains("70 - 110"), "{rendered}");
    assert!(rendered.contains(">= 75"), "{rendered}");
    assert!(rendered.contains("Possible"), "{rendered}");
    // BTreeMap order: General before Metabolic.
    let general = rendered.find("General").unwrap();
    let metabolic = rendered.find("Metabolic").unwrap();
    assert!(general < metabolic);
}

#[test]
fn metrics_table_lists_catalog_in_order() {
    let metrics = vec![
        Metric {
            oru_sonic_codes: vec!["GLU".to_string(), "GLUC".to_string()],
            oru_sonic_units: vec!["mg/dL".to_string()],
            min_age: Some(18),
            gender: MetricGender::Female,
            standard_lower: Some(70.0),
            standard_higher: Some(110.0),
            diagnostic: Some(Diagnostic {
                name: "Blood Sugar".to_string(),
                groups: vec![
                    Group {
                        name: "Metabolic".to_string(),
                    },
                    Group {
                        name: "General".to_string(),
                    },
                ],
            }),
            ..Metric::new("Fasting Glucose")
        },
        Metric::new("Sodium"),
    ];
    let mut table = metrics_table(&metrics);
    table.force_no_tty();
    assert_eq!(table.row_iter().count(), 2);
    let rendered = table.to_string();
    assert!(rendered.contains("GLU, GLUC"), "{rendered}");
    assert!(rendered.contains(">= 18"), "{rendered}");
    assert!(rendered.contains("Metabolic, General"), "{rendered}");
    assert!(rendered.contains("any"), "{rendered}");
    assert!(rendered.find("Fasting Glucose").unwrap() < rendered.find("Sodium").unwrap());
}
