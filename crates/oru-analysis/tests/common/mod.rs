#![allow(dead_code)]

use oru_model::{Condition, Diagnostic, Group, Metric, MetricGender};

pub const REPORT: &str = include_str!("../fixtures/report.oru.txt");

pub fn metric(name: &str, code: &str, unit: &str) -> Metric {
    Metric {
        oru_sonic_codes: vec![code.to_string()],
        oru_sonic_units: if unit.is_empty() {
            Vec::new()
        } else {
            vec![unit.to_string()]
        },
        units: if unit.is_empty() {
            Vec::new()
        } else {
            vec![unit.to_string()]
        },
        ..Metric::new(name)
    }
}

pub fn diagnostic(name: &str, groups: &[&str]) -> Option<Diagnostic> {
    Some(Diagnostic {
        name: name.to_string(),
        groups: groups
            .iter()
            .map(|g| Group {
                name: g.to_string(),
            })
            .collect(),
    })
}

/// Catalog for the fixture report.
pub fn report_catalog() -> Vec<Metric> {
    vec![
        Metric {
            max_age: Some(17),
            standard_lower: Some(60.0),
            standard_higher: Some(100.0),
            diagnostic: diagnostic("Blood Sugar", &["Paediatrics"]),
            ..metric("Glucose (child)", "GLU", "mg/dL")
        },
        Metric {
            min_age: Some(18),
            standard_lower: Some(70.0),
            standard_higher: Some(110.0),
            everlab_lower: Some(75.0),
            everlab_higher: Some(100.0),
            condition: Some(Condition {
                name: "Diabetes".to_string(),
            }),
            diagnostic: diagnostic("Blood Sugar", &["Metabolic", "General"]),
            ..metric("Fasting Glucose", "GLU", "mg/dL")
        },
        Metric {
            gender: MetricGender::Male,
            standard_lower: Some(136.0),
            standard_higher: Some(146.0),
            diagnostic: diagnostic("Electrolytes", &["Kidney"]),
            ..metric("Sodium (male)", "NA", "mmol/L")
        },
        Metric {
            standard_lower: Some(135.0),
            standard_higher: Some(145.0),
            everlab_lower: Some(137.0),
            everlab_higher: Some(142.0),
            diagnostic: diagnostic("Electrolytes", &["Kidney"]),
            ..metric("Sodium", "NA", "mmol/L")
        },
        Metric {
            standard_higher: Some(5.0),
            everlab_lower: Some(0.2),
            everlab_higher: Some(3.0),
            diagnostic: diagnostic("Inflammation", &["General"]),
            ..metric("CRP", "CRP", "mg/L")
        },
        Metric {
            standard_lower: Some(1.0),
            diagnostic: diagnostic("Cardiac Risk", &[]),
            ..metric("hs-CRP", "HSCRP", "mg/L")
        },
        Metric {
            standard_lower: Some(60.0),
            diagnostic: diagnostic("Kidney Function", &["Kidney"]),
            ..metric("eGFR", "EGFR", "")
        },
        Metric {
            standard_lower: Some(3.5),
            standard_higher: Some(5.0),
            diagnostic: diagnostic("Liver", &["Liver"]),
            ..metric("Albumin", "ALB", "g/dL")
        },
    ]
}
