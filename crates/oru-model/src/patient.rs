//! Patient demographics read from the identification segment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative sex of the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Maps a message sex code to a gender. Only `M` and `F` are recognised.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Demographics derived once per message.
///
/// Every attribute is independently optional: a missing field never
/// prevents the others from being populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Whole years between the date of birth and the processing date.
    pub age: Option<u32>,
    pub gender: Option<Gender>,
}
