//! Observation results extracted from a lab report.
//!
//! Two value types are supported:
//!
//! - `NM` (numeric): a plain number, e.g. `5.4`
//! - `SN` (structured numeric): an inequality-qualified number, e.g. `< 0.1`
//!
//! Anything else is dropped before it reaches this model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparator of a structured numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    /// The true value is below the reported one.
    #[serde(rename = "<")]
    Less,
    /// The true value is above the reported one.
    #[serde(rename = ">")]
    Greater,
}

impl Comparator {
    /// Parses the comparator component of a structured numeric field.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Comparator::Less),
            ">" => Some(Comparator::Greater),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Less => "<",
            Comparator::Greater => ">",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value of a single observation.
///
/// `value` may be `NaN` when the message carried text that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ResultValue {
    #[serde(rename = "NM")]
    Numeric { value: f64 },
    #[serde(rename = "SN")]
    Qualified { comparator: Comparator, value: f64 },
}

impl ResultValue {
    pub fn value(&self) -> f64 {
        match self {
            ResultValue::Numeric { value } | ResultValue::Qualified { value, .. } => *value,
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Numeric { value } => f.write_str(&format_number(*value)),
            ResultValue::Qualified { comparator, value } => {
                write!(f, "{comparator} {}", format_number(*value))
            }
        }
    }
}

/// One observation as reported by the lab, before it is matched to a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    /// Test code reported by the lab.
    pub oru_sonic_code: String,
    /// Unit reported by the lab; empty when the message has none.
    pub oru_sonic_unit: String,
    pub result: ResultValue,
}

/// Renders a number the way report consumers expect it.
///
/// Integral values print without a fractional part (`50`, not `50.0`),
/// non-finite values print as `NaN`, `Infinity` and `-Infinity`. Magnitudes
/// of `1e21` and above or below `1e-6` use exponent notation (`1e+21`,
/// `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else if value.abs() >= EXPONENT_ABOVE || value.abs() < EXPONENT_BELOW {
        format_exponent(value)
    } else {
        format!("{value}")
    }
}

const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

/// Shortest digits with an explicitly signed exponent.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
