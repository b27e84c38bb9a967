#![deny(unsafe_code)]

pub mod decoder;
pub mod extract;
pub mod hl7_date;
pub mod numeric;

pub use decoder::{DecodedMessage, DecodedRecord, FieldAccess, Separators, decode};
pub use extract::{
    Extraction, ObservationOutcome, SkipReason, SkippedObservation, extract, extract_as_of,
    read_observation,
};
pub use hl7_date::parse_hl7_date;
pub use numeric::parse_float;
