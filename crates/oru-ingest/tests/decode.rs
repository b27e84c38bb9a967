use oru_ingest::{FieldAccess, decode};
use oru_model::DecodeError;

const REPORT: &str = include_str!("fixtures/report.oru.txt");

#[test]
fn decodes_fixture_in_segment_order() {
    let message = decode(REPORT).expect("decode report");
    let names: Vec<&str> = message.records().iter().map(|r| r.segment()).collect();
    assert_eq!(
        names,
        vec!["MSH", "PID", "OBR", "OBX", "OBX", "OBX", "OBX", "OBX", "OBX", "OBX", "OBX"]
    );
    assert_eq!(message.segments("OBX").count(), 8);
}

#[test]
fn addresses_fields_and_components() {
    let message = decode(REPORT).expect("decode report");
    let pid = &message.records()[1];
    assert_eq!(pid.field("PID.5"), Some("SMITH^JANE^MARIE"));
    assert_eq!(pid.field("PID.5.1"), Some("SMITH"));
    assert_eq!(pid.field("PID.5.2"), Some("JANE"));
    assert_eq!(pid.field("PID.7"), Some("19850612"));
    assert_eq!(pid.field("PID.8"), Some("F"));
    assert_eq!(pid.field("PID.4"), None);

    let crp = message.segments("OBX").nth(2).expect("third OBX");
    assert_eq!(crp.field("OBX.5"), Some("<^0.1"));
    assert_eq!(crp.field("OBX.5.1"), Some("<"));
    assert_eq!(crp.field("OBX.5.2"), Some("0.1"));
    assert_eq!(crp.field("OBX.6.1"), Some("mg/L"));
}

#[test]
fn accepts_line_feed_and_crlf_delimiters() {
    let lf = REPORT.replace('\r', "\n");
    let crlf = REPORT.replace('\r', "\r\n");
    let expected = decode(REPORT).expect("decode report");
    assert_eq!(decode(&lf).expect("decode lf"), expected);
    assert_eq!(decode(&crlf).expect("decode crlf"), expected);
}

#[test]
fn rejects_empty_message() {
    assert_eq!(decode(""), Err(DecodeError::Empty));
    assert_eq!(decode(" \r\n \n"), Err(DecodeError::Empty));
}

#[test]
fn rejects_message_without_header() {
    assert_eq!(
        decode("PID|1||MRN"),
        Err(DecodeError::MissingHeader {
            found: "PID".to_string()
        })
    );
    assert!(matches!(
        decode("just some text"),
        Err(DecodeError::MissingHeader { .. })
    ));
}

#[test]
fn rejects_short_header() {
    assert_eq!(decode("MSH|^~"), Err(DecodeError::HeaderTooShort));
}

#[test]
fn rejects_segments_run_together() {
    // Segment delimiters missing: the second segment name is swallowed.
    let joined = "MSH|^~\\&|LAB\rPIDX|1";
    assert_eq!(
        decode(joined),
        Err(DecodeError::InvalidSegmentName {
            line: 2,
            name: "PIDX".to_string()
        })
    );
    assert!(matches!(
        decode("MSH|^~\\&|LAB\robx|1|NM"),
        Err(DecodeError::InvalidSegmentName { line: 2, .. })
    ));
}

#[test]
fn decodes_bom_prefixed_message() {
    let with_bom = format!("\u{feff}{REPORT}");
    let expected = decode(REPORT).expect("decode report");
    assert_eq!(decode(&with_bom).expect("decode report with BOM"), expected);
    assert_eq!(expected.records().len(), 11);
}

#[test]
fn records_only_non_empty_values() {
    let message = decode("MSH|^~\\&\rOBX|1|NM|^GLU||5.4").expect("decode message");
    let obx = &message.records()[1];
    let paths: Vec<&str> = obx.values().keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec!["OBX.1", "OBX.1.1", "OBX.2", "OBX.2.1", "OBX.3", "OBX.3.2", "OBX.5", "OBX.5.1"]
    );
}
