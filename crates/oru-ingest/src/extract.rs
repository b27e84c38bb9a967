//! Extraction of patient demographics and observation results.
//!
//! Extraction is the boundary between loosely typed decoded records and the
//! typed model: nothing downstream sees a field path.

use chrono::{Local, NaiveDate};
use oru_model::{Comparator, Gender, PersonalDetails, RawResult, ResultValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decoder::FieldAccess;
use crate::hl7_date::parse_hl7_date;
use crate::numeric::parse_float;

const FIRST_NAME: &str = "PID.5.2";
const LAST_NAME: &str = "PID.5.1";
const DATE_OF_BIRTH: &str = "PID.7";
const GENDER: &str = "PID.8";

const VALUE_TYPE: &str = "OBX.2";
const TEST_CODE: &str = "OBX.3.2";
const NUMERIC_VALUE: &str = "OBX.5";
const COMPARATOR: &str = "OBX.5.1";
const QUALIFIED_VALUE: &str = "OBX.5.2";
const UNIT: &str = "OBX.6.1";

/// Why a supported observation could not be turned into a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Structured numeric value with a comparator other than `<` or `>`.
    UnsupportedComparator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedObservation {
    pub oru_sonic_code: String,
    pub reason: SkipReason,
}

/// Outcome of reading one record that carries a supported observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationOutcome {
    Recognized(RawResult),
    Skipped(SkippedObservation),
}

/// Everything extraction pulls out of a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub personal_details: PersonalDetails,
    /// Results in message order.
    pub results: Vec<RawResult>,
    pub skipped: Vec<SkippedObservation>,
}

/// Extracts details and results, computing the patient's age as of today.
pub fn extract<R: FieldAccess>(records: &[R]) -> Extraction {
    extract_as_of(records, Local::now().date_naive())
}

/// Extracts details and results, computing the patient's age as of `today`.
pub fn extract_as_of<R: FieldAccess>(records: &[R], today: NaiveDate) -> Extraction {
    let personal_details = read_personal_details(records, today);

    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for outcome in records.iter().filter_map(read_observation) {
        match outcome {
            ObservationOutcome::Recognized(result) => results.push(result),
            ObservationOutcome::Skipped(observation) => {
                warn!(
                    code = %observation.oru_sonic_code,
                    reason = ?observation.reason,
                    "skipping observation"
                );
                skipped.push(observation);
            }
        }
    }

    debug!(
        results = results.len(),
        skipped = skipped.len(),
        has_age = personal_details.age.is_some(),
        has_gender = personal_details.gender.is_some(),
        "extracted report"
    );

    Extraction {
        personal_details,
        results,
        skipped,
    }
}

/// Reads one record as an observation.
///
/// Returns `None` for records that are not `NM`/`SN` observations with a
/// test code; those are not results and are ignored.
pub fn read_observation<R: FieldAccess>(record: &R) -> Option<ObservationOutcome> {
    let code = record.field(TEST_CODE)?;
    let value_type = record.field(VALUE_TYPE)?;

    let result = match value_type {
        "NM" => ResultValue::Numeric {
            value: parse_float(record.field(NUMERIC_VALUE).unwrap_or_default()),
        },
        "SN" => {
            let symbol = record.field(COMPARATOR).unwrap_or_default();
            let Some(comparator) = Comparator::from_symbol(symbol) else {
                return Some(ObservationOutcome::Skipped(SkippedObservation {
                    oru_sonic_code: code.to_string(),
                    reason: SkipReason::UnsupportedComparator(symbol.to_string()),
                }));
            };
            ResultValue::Qualified {
                comparator,
                value: parse_float(record.field(QUALIFIED_VALUE).unwrap_or_default()),
            }
        }
        _ => return None,
    };

    Some(ObservationOutcome::Recognized(RawResult {
        oru_sonic_code: code.to_string(),
        oru_sonic_unit: record.field(UNIT).unwrap_or_default().to_string(),
        result,
    }))
}

fn read_personal_details<R: FieldAccess>(records: &[R], today: NaiveDate) -> PersonalDetails {
    let age = first_field(records, DATE_OF_BIRTH)
        .and_then(parse_hl7_date)
        .and_then(|dob| today.years_since(dob));

    PersonalDetails {
        first_name: first_field(records, FIRST_NAME).map(str::to_string),
        last_name: first_field(records, LAST_NAME).map(str::to_string),
        age,
        gender: first_field(records, GENDER).and_then(Gender::from_code),
    }
}

fn first_field<'a, R: FieldAccess>(records: &'a [R], path: &str) -> Option<&'a str> {
    records.iter().find_map(|r| r.field(path))
}
