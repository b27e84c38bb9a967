//! Reference metrics from the catalog.
//!
//! A metric describes one lab test for one population (age band and
//! gender): which reported codes and units identify it, and the two
//! reference ranges results are classified against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::patient::Gender;

/// Population a metric applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricGender {
    Male,
    Female,
    /// Applies regardless of the patient's gender.
    Any,
}

impl MetricGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricGender::Male => "Male",
            MetricGender::Female => "Female",
            MetricGender::Any => "Any",
        }
    }

    /// Returns true if a patient of the given gender falls in this population.
    ///
    /// An unknown patient gender only fits `Any`.
    pub fn admits(&self, gender: Option<Gender>) -> bool {
        match (self, gender) {
            (MetricGender::Any, _) => true,
            (MetricGender::Male, Some(Gender::Male)) => true,
            (MetricGender::Female, Some(Gender::Female)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for MetricGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricGender {
    type Err = String;

    /// Parses `Male`, `Female` or `Any` (exact spelling).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(MetricGender::Male),
            "Female" => Ok(MetricGender::Female),
            "Any" => Ok(MetricGender::Any),
            _ => Err(format!("Unknown metric gender: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
}

/// Diagnostic owning a metric, with the groups it is displayed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub name: String,
    pub groups: Vec<Group>,
}

/// A catalog entry. Read-only to the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    /// Lab test codes identifying this metric.
    pub oru_sonic_codes: Vec<String>,
    /// Lab units identifying this metric. Empty means "reported without a unit".
    pub oru_sonic_units: Vec<String>,
    /// Display units, the first one is shown next to results.
    pub units: Vec<String>,
    /// Inclusive lower age bound, `None` when unbounded.
    pub min_age: Option<u32>,
    /// Inclusive upper age bound, `None` when unbounded.
    pub max_age: Option<u32>,
    pub gender: MetricGender,
    pub standard_lower: Option<f64>,
    pub standard_higher: Option<f64>,
    pub everlab_lower: Option<f64>,
    pub everlab_higher: Option<f64>,
    pub condition: Option<Condition>,
    pub diagnostic: Option<Diagnostic>,
}

impl Metric {
    /// Creates an unrestricted metric (any age, any gender, no ranges, no diagnostic).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oru_sonic_codes: Vec::new(),
            oru_sonic_units: Vec::new(),
            units: Vec::new(),
            min_age: None,
            max_age: None,
            gender: MetricGender::Any,
            standard_lower: None,
            standard_higher: None,
            everlab_lower: None,
            everlab_higher: None,
            condition: None,
            diagnostic: None,
        }
    }

    /// Unit shown next to results; empty if none is configured.
    pub fn display_unit(&self) -> &str {
        self.units.first().map(String::as_str).unwrap_or("")
    }

    pub fn diagnostic_name(&self) -> Option<&str> {
        self.diagnostic.as_ref().map(|d| d.name.as_str())
    }

    pub fn condition_name(&self) -> Option<&str> {
        self.condition.as_ref().map(|c| c.name.as_str())
    }

    /// Names of the groups the owning diagnostic belongs to, in catalog order.
    pub fn group_names(&self) -> Vec<&str> {
        self.diagnostic
            .as_ref()
            .map(|d| d.groups.iter().map(|g| g.name.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_gender_from_str() {
        assert_eq!("Male".parse::<MetricGender>().unwrap(), MetricGender::Male);
        assert_eq!(" Any ".parse::<MetricGender>().unwrap(), MetricGender::Any);
        assert!("male".parse::<MetricGender>().is_err());
        assert!("".parse::<MetricGender>().is_err());
    }

    #[test]
    fn metric_gender_admits() {
        assert!(MetricGender::Any.admits(None));
        assert!(MetricGender::Any.admits(Some(Gender::Male)));
        assert!(MetricGender::Female.admits(Some(Gender::Female)));
        assert!(!MetricGender::Female.admits(Some(Gender::Male)));
        assert!(!MetricGender::Male.admits(None));
    }

    #[test]
    fn group_names_follow_diagnostic() {
        let mut metric = Metric::new("Glucose");
        assert!(metric.group_names().is_empty());
        metric.diagnostic = Some(Diagnostic {
            name: "Diabetes".to_string(),
            groups: vec![
                Group {
                    name: "Metabolic".to_string(),
                },
                Group {
                    name: "General".to_string(),
                },
            ],
        });
        assert_eq!(metric.group_names(), vec!["Metabolic", "General"]);
        assert_eq!(metric.diagnostic_name(), Some("Diabetes"));
        assert_eq!(metric.display_unit(), "");
    }
}
