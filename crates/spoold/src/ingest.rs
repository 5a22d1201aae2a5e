//! Line ingestion
//!
//! The daemon reads newline-delimited input. A line that parses as a JSON
//! envelope `{"category": "...", "payload": ...}` is routed by its
//! category; a string payload stays text, anything else is kept
//! structured. Every other line is treated as raw text under the default
//! category.

use serde::Deserialize;
use serde_json::Value;

use spool_persist::Record;

/// Category for lines that carry no envelope
pub const DEFAULT_CATEGORY: &str = "default";

#[derive(Debug, Deserialize)]
struct Envelope {
    category: String,
    payload: Value,
}

/// Turn one input line into a record, or `None` for blank lines
pub fn parse_line(line: &str) -> Option<Record> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_str::<Envelope>(line) {
        Ok(envelope) => Some(match envelope.payload {
            Value::String(text) => Record::text(envelope.category, text),
            payload => Record::structured(envelope.category, payload),
        }),
        Err(_) => Some(Record::text(DEFAULT_CATEGORY, line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spool_persist::Payload;

    #[test]
    fn test_blank_lines_are_dropped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \t").is_none());
    }

    #[test]
    fn test_envelope_with_string_payload_stays_text() {
        let record = parse_line(r#"{"category": "orders", "payload": "order accepted"}"#).unwrap();
        assert_eq!(record.category(), "orders");
        assert_eq!(
            record.payload(),
            &Payload::Text("order accepted".to_string())
        );
    }

    #[test]
    fn test_envelope_with_object_payload_is_structured() {
        let record = parse_line(r#"{"category": "orders", "payload": {"id": 7}}"#).unwrap();
        assert_eq!(record.category(), "orders");
        assert!(matches!(record.payload(), Payload::Structured(_)));
    }

    #[test]
    fn test_plain_text_falls_back_to_default_category() {
        let record = parse_line("just a log line").unwrap();
        assert_eq!(record.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_json_without_category_is_treated_as_text() {
        let record = parse_line(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.category(), DEFAULT_CATEGORY);
        assert_eq!(record.payload(), &Payload::Text(r#"{"id": 7}"#.to_string()));
    }
}
