//! Segmented message decoding.
//!
//! A message is a sequence of segments separated by carriage returns (line
//! feeds are accepted too). Each segment starts with a three-character name
//! followed by fields separated by the field separator declared in `MSH`.
//! Fields are split into components, components into sub-components.
//!
//! Decoding produces one [`DecodedRecord`] per segment. Values are addressed
//! by dotted path:
//!
//! - `PID.7` - the raw text of field 7 of a `PID` segment
//! - `PID.5.1` - component 1 of field 5 (present even when the field has no
//!   component separator)
//!
//! Empty fields and components are not recorded, so a lookup of them yields
//! `None`.

use std::collections::BTreeMap;

use oru_model::{DecodeError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the header segment every message starts with.
const HEADER_SEGMENT: &str = "MSH";

/// Leading marker left by some exporters; not part of the message.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Read access to decoded values by dotted path.
///
/// This is the only capability extraction needs from a decoder.
pub trait FieldAccess {
    fn field(&self, path: &str) -> Option<&str>;
}

impl FieldAccess for BTreeMap<String, String> {
    fn field(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}

/// Delimiters declared in the `MSH` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Separators {
    fn from_header(line: &str) -> Result<Self> {
        let mut chars = line.chars().skip(HEADER_SEGMENT.len());
        let (Some(field), Some(component), Some(repetition), Some(escape), Some(subcomponent)) = (
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
        ) else {
            return Err(DecodeError::HeaderTooShort);
        };
        Ok(Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        })
    }
}

/// One decoded segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    segment: String,
    values: BTreeMap<String, String>,
}

impl DecodedRecord {
    /// Segment name, e.g. `PID` or `OBX`.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// All recorded paths with their values, sorted by path.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn insert(&mut self, path: String, value: String) {
        if !value.is_empty() {
            self.values.insert(path, value);
        }
    }
}

impl FieldAccess for DecodedRecord {
    fn field(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }
}

/// A decoded message: records in message order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMessage {
    pub separators: Separators,
    pub records: Vec<DecodedRecord>,
}

impl DecodedMessage {
    pub fn records(&self) -> &[DecodedRecord] {
        &self.records
    }

    /// Records of one segment type, in message order.
    pub fn segments<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DecodedRecord> + 'a {
        self.records.iter().filter(move |r| r.segment == name)
    }

    /// Value of `path` in the first record that has it.
    pub fn first_field(&self, path: &str) -> Option<&str> {
        self.records.iter().find_map(|r| r.field(path))
    }
}

/// Decodes raw message text into records.
///
/// A leading byte-order mark is ignored.
///
/// # Errors
///
/// Fails when the text is empty, does not start with an `MSH` segment, the
/// header is too short to declare its delimiters, or a segment name is not
/// three upper-case letters or digits followed by the field separator.
pub fn decode(text: &str) -> Result<DecodedMessage> {
    let mut lines = text
        .trim_start_matches(BYTE_ORDER_MARK)
        .split(['\r', '\n'])
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let Some(&(_, header)) = lines.peek() else {
        return Err(DecodeError::Empty);
    };
    if !header.starts_with(HEADER_SEGMENT) {
        return Err(DecodeError::MissingHeader {
            found: header.chars().take(HEADER_SEGMENT.len()).collect(),
        });
    }
    let separators = Separators::from_header(header)?;

    let mut records = Vec::new();
    for (line_no, line) in lines {
        records.push(decode_segment(line_no, line, &separators)?);
    }
    debug!(segments = records.len(), "decoded message");

    Ok(DecodedMessage {
        separators,
        records,
    })
}

fn decode_segment(line_no: usize, line: &str, separators: &Separators) -> Result<DecodedRecord> {
    let mut parts = line.split(separators.field);
    let name = parts.next().unwrap_or_default();
    if name.len() != 3
        || !name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(DecodeError::InvalidSegmentName {
            line: line_no,
            name: name.to_string(),
        });
    }

    let mut record = DecodedRecord {
        segment: name.to_string(),
        values: BTreeMap::new(),
    };

    if name == HEADER_SEGMENT {
        // MSH.1 is the field separator itself and MSH.2 the encoding
        // characters, neither is split into components.
        record.insert(format!("{name}.1"), separators.field.to_string());
        record.insert(format!("{name}.2"), parts.next().unwrap_or_default().to_string());
        for (idx, field) in parts.enumerate() {
            insert_field(&mut record, idx + 3, field, separators);
        }
    } else {
        for (idx, field) in parts.enumerate() {
            insert_field(&mut record, idx + 1, field, separators);
        }
    }

    Ok(record)
}

fn insert_field(record: &mut DecodedRecord, position: usize, field: &str, separators: &Separators) {
    let path = format!("{}.{position}", record.segment);
    // Components come from the first repetition only.
    let first_repetition = field.split(separators.repetition).next().unwrap_or_default();
    for (idx, component) in first_repetition.split(separators.component).enumerate() {
        record.insert(
            format!("{path}.{}", idx + 1),
            unescape(component, separators),
        );
    }
    record.insert(path, field.to_string());
}

/// Replaces delimiter escape sequences (`\F\`, `\S\`, `\T\`, `\R\`, `\E\`).
///
/// Unknown sequences are kept verbatim.
fn unescape(value: &str, separators: &Separators) -> String {
    let esc = separators.escape;
    if !value.contains(esc) {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find(esc) {
        out.push_str(&rest[..start]);
        let after = &rest[start + esc.len_utf8()..];
        let Some(end) = after.find(esc) else {
            out.push_str(&rest[start..]);
            return out;
        };
        let replacement = match &after[..end] {
            "F" => Some(separators.field),
            "S" => Some(separators.component),
            "R" => Some(separators.repetition),
            "T" => Some(separators.subcomponent),
            "E" => Some(esc),
            _ => None,
        };
        match replacement {
            Some(ch) => out.push(ch),
            None => out.push_str(&rest[start..start + esc.len_utf8() * 2 + end]),
        }
        rest = &after[end + esc.len_utf8()..];
    }
    out.push_str(rest);
    out
}
