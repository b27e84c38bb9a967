use oru_ingest::{decode, extract, parse_float};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_float_reads_rendered_numbers(value in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        prop_assert_eq!(parse_float(&format!("{value}")), value);
    }

    #[test]
    fn parse_float_ignores_trailing_text(value in -1.0e6f64..1.0e6, suffix in "[ a-zA-Z/%]{0,8}") {
        prop_assert_eq!(parse_float(&format!("{value}{suffix}")), value);
    }

    #[test]
    fn parse_float_never_panics(text in "\\PC{0,24}") {
        let _ = parse_float(&text);
    }

    #[test]
    fn decode_and_extract_never_panic(body in "[A-Z0-9|^~&\\\\\r\n <>.a-z]{0,200}") {
        let text = format!("MSH|^~\\&|{body}");
        if let Ok(message) = decode(&text) {
            let _ = extract(message.records());
        }
    }
}
