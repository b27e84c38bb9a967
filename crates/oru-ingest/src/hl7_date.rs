//! Message timestamp parsing (`YYYY[MM[DD[HH[MM[SS[.S+]]]]]][+/-ZZZZ]`).

use chrono::{NaiveDate, NaiveTime};

/// Parses the date part of a message timestamp.
///
/// Missing month or day default to 1. Time components are validated but
/// discarded, as is the zone offset. Returns `None` for anything that is not
/// a valid timestamp.
pub fn parse_hl7_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let (stamp, offset) = split_offset(raw);
    if let Some(offset) = offset
        && (offset.len() != 4 || !offset.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let (digits, fraction) = match stamp.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (stamp, None),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction
        && (digits.len() != 14 || fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let part = |range: std::ops::Range<usize>| digits.get(range).and_then(|s| s.parse::<u32>().ok());
    let (year, month, day) = match digits.len() {
        4 => (part(0..4)?, 1, 1),
        6 => (part(0..4)?, part(4..6)?, 1),
        8 | 10 | 12 | 14 => (part(0..4)?, part(4..6)?, part(6..8)?),
        _ => return None,
    };
    if digits.len() > 8 {
        let hour = part(8..10)?;
        let minute = part(10..12).unwrap_or(0);
        let second = part(12..14).unwrap_or(0);
        NaiveTime::from_hms_opt(hour, minute, second)?;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn split_offset(raw: &str) -> (&str, Option<&str>) {
    match raw.find(['+', '-']) {
        Some(idx) => (&raw[..idx], Some(&raw[idx + 1..])),
        None => (raw, None),
    }
}
