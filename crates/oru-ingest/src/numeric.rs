//! Lenient number parsing for observation values.

/// Parses the longest numeric prefix of `raw`.
///
/// Leading whitespace is skipped and trailing text ignored, so `"12.5 H"`
/// reads as `12.5`. `Infinity` (optionally signed) is recognised. Text with
/// no numeric prefix yields `NaN` rather than an error: a malformed value
/// must still flow through classification.
pub fn parse_float(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut idx = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }
    if text[idx..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut digits = count_digits(&bytes[idx..]);
    idx += digits;
    if bytes.get(idx) == Some(&b'.') {
        let fraction = count_digits(&bytes[idx + 1..]);
        digits += fraction;
        idx += 1 + fraction;
    }
    if digits == 0 {
        return f64::NAN;
    }

    let mut end = idx;
    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        let mut exp = idx + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
