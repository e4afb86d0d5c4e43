//! Shape detection for untyped message records.
//!
//! Each record in the messages array is inspected once, classified as one of
//! the known export shapes, and deserialized into the matching typed record.
//! Everything downstream works on [`Record`] and never looks at raw JSON keys
//! again.
//!
//! # Detection order
//!
//! 1. Has `sender_name` → [`Shape::Legacy`]
//! 2. Has `senderName` → [`Shape::V2`]
//! 3. Otherwise → [`Shape::Unknown`]
//!
//! Legacy is always checked first, so a record carrying both keys is legacy.
//!
//! ```rust
//! use chatview::detect::{Shape, detect};
//! use serde_json::json;
//!
//! assert_eq!(detect(&json!({"sender_name": "A"})), Shape::Legacy);
//! assert_eq!(detect(&json!({"senderName": "A"})), Shape::V2);
//! assert_eq!(detect(&json!({"sender_name": "A", "senderName": "A"})), Shape::Legacy);
//! assert_eq!(detect(&json!({"from": "A"})), Shape::Unknown);
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::record::{LegacyMessage, V2Message};

/// Key present only in legacy records.
pub const LEGACY_KEY: &str = "sender_name";

/// Key present only in V2 records.
pub const V2_KEY: &str = "senderName";

/// Export shape of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Legacy,
    V2,
    Unknown,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Legacy => write!(f, "legacy"),
            Shape::V2 => write!(f, "v2"),
            Shape::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classifies a raw record by which distinguishing key it carries.
///
/// Non-object values are [`Shape::Unknown`].
pub fn detect(record: &Value) -> Shape {
    let Some(object) = record.as_object() else {
        return Shape::Unknown;
    };

    if object.contains_key(LEGACY_KEY) {
        Shape::Legacy
    } else if object.contains_key(V2_KEY) {
        Shape::V2
    } else {
        Shape::Unknown
    }
}

/// A record resolved to its typed shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Legacy(LegacyMessage),
    V2(V2Message),
}

impl Record {
    /// Returns the shape this record was resolved to.
    pub fn shape(&self) -> Shape {
        match self {
            Record::Legacy(_) => Shape::Legacy,
            Record::V2(_) => Shape::V2,
        }
    }
}

/// Outcome of classifying one raw record.
#[derive(Debug)]
pub enum Classified {
    /// Shape detected and fields deserialized.
    Record(Record),
    /// Neither distinguishing key is present.
    Unknown,
    /// Shape detected, but a required field is missing or has the wrong type.
    Invalid {
        shape: Shape,
        error: serde_json::Error,
    },
}

/// Detects the shape of `record` and deserializes it into a typed [`Record`].
pub fn classify(record: &Value) -> Classified {
    match detect(record) {
        Shape::Legacy => match LegacyMessage::deserialize(record) {
            Ok(msg) => Classified::Record(Record::Legacy(msg)),
            Err(error) => Classified::Invalid {
                shape: Shape::Legacy,
                error,
            },
        },
        Shape::V2 => match V2Message::deserialize(record) {
            Ok(msg) => Classified::Record(Record::V2(msg)),
            Err(error) => Classified::Invalid {
                shape: Shape::V2,
                error,
            },
        },
        Shape::Unknown => Classified::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_legacy() {
        let record = json!({"sender_name": "Alice", "timestamp_ms": 0});
        assert_eq!(detect(&record), Shape::Legacy);
    }

    #[test]
    fn test_detect_v2() {
        let record = json!({"senderName": "Alice", "timestamp": 0, "type": "text"});
        assert_eq!(detect(&record), Shape::V2);
    }

    #[test]
    fn test_detect_legacy_wins_when_both_present() {
        let record = json!({"senderName": "V2", "sender_name": "Legacy", "timestamp_ms": 0});
        assert_eq!(detect(&record), Shape::Legacy);

        match classify(&record) {
            Classified::Record(Record::Legacy(msg)) => assert_eq!(msg.sender_name, "Legacy"),
            other => panic!("expected legacy record, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_is_case_sensitive() {
        assert_eq!(detect(&json!({"Sender_Name": "A"})), Shape::Unknown);
        assert_eq!(detect(&json!({"sendername": "A"})), Shape::Unknown);
    }

    #[test]
    fn test_detect_non_objects() {
        assert_eq!(detect(&json!(null)), Shape::Unknown);
        assert_eq!(detect(&json!("sender_name")), Shape::Unknown);
        assert_eq!(detect(&json!(["sender_name"])), Shape::Unknown);
    }

    #[test]
    fn test_classify_unknown() {
        assert!(matches!(classify(&json!({"author": "A"})), Classified::Unknown));
    }

    #[test]
    fn test_classify_invalid_legacy() {
        let record = json!({"sender_name": "A", "timestamp_ms": "yesterday"});
        match classify(&record) {
            Classified::Invalid { shape, .. } => assert_eq!(shape, Shape::Legacy),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_invalid_v2() {
        let record = json!({"senderName": "A", "timestamp": 0});
        match classify(&record) {
            Classified::Invalid { shape, .. } => assert_eq!(shape, Shape::V2),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_record_shape() {
        let record = json!({"senderName": "A", "timestamp": 0, "type": "text"});
        match classify(&record) {
            Classified::Record(record) => assert_eq!(record.shape(), Shape::V2),
            other => panic!("expected record, got {other:?}"),
        }
    }
}
