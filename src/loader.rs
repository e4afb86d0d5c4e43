//! Export file loading.
//!
//! Turns the raw bytes of an export into the untyped records of its messages
//! array. Nothing here looks inside the records; that is the job of
//! [`detect`](crate::detect).
//!
//! # Example
//!
//! ```rust
//! use chatview::loader::Loader;
//!
//! let json = br#"{"participants": [], "messages": [{"sender_name": "Alice"}]}"#;
//! let records = Loader::new().load(json)?;
//! assert_eq!(records.len(), 1);
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::DEFAULT_MESSAGES_FIELD;
use crate::error::ChatviewError;

/// A record of the messages array whose shape is not yet known.
pub type RawRecord = Value;

const FORMAT: &str = "chat export";

/// Byte-order mark some editors put at the start of UTF-8 files.
const BOM: char = '\u{FEFF}';

/// Loader for JSON chat exports.
#[derive(Debug, Clone)]
pub struct Loader {
    messages_field: String,
}

impl Loader {
    /// Creates a loader reading the `messages` field.
    pub fn new() -> Self {
        Self {
            messages_field: DEFAULT_MESSAGES_FIELD.to_string(),
        }
    }

    /// Creates a loader reading a custom array field.
    pub fn with_field(field: impl Into<String>) -> Self {
        Self {
            messages_field: field.into(),
        }
    }

    /// Returns the name of the field holding the message array.
    pub fn messages_field(&self) -> &str {
        &self.messages_field
    }

    /// Loads records from raw file bytes.
    pub fn load(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, ChatviewError> {
        let content = decode(bytes, "export file")?;
        self.load_str(content)
    }

    /// Loads records from already-decoded text. A leading byte-order mark is skipped.
    pub fn load_str(&self, content: &str) -> Result<Vec<RawRecord>, ChatviewError> {
        let document: Value = serde_json::from_str(strip_bom(content))?;
        self.extract(document)
    }

    /// Reads and loads an export file from disk.
    pub fn load_path(&self, path: &Path) -> Result<Vec<RawRecord>, ChatviewError> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read export file");

        let content = decode(&bytes, path.display().to_string())?;
        let document: Value = serde_json::from_str(content)
            .map_err(|e| ChatviewError::export_parse(e, Some(path.to_path_buf())))?;
        self.extract(document)
    }

    fn extract(&self, document: Value) -> Result<Vec<RawRecord>, ChatviewError> {
        let mut object = match document {
            Value::Object(object) => object,
            other => {
                return Err(ChatviewError::invalid_format(
                    FORMAT,
                    format!("expected a JSON object, found {}", kind(&other)),
                ));
            }
        };

        match object.remove(&self.messages_field) {
            Some(Value::Array(records)) => {
                debug!(
                    field = %self.messages_field,
                    records = records.len(),
                    "loaded messages array"
                );
                Ok(records)
            }
            Some(other) => Err(ChatviewError::invalid_format(
                FORMAT,
                format!(
                    "'{}' must be an array, found {}",
                    self.messages_field,
                    kind(&other)
                ),
            )),
            None => Err(ChatviewError::invalid_format(
                FORMAT,
                format!("missing '{}' array", self.messages_field),
            )),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads the `messages` array from raw file bytes.
pub fn load(bytes: &[u8]) -> Result<Vec<RawRecord>, ChatviewError> {
    Loader::new().load(bytes)
}

/// Reads an export file and loads its `messages` array.
pub fn load_path(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, ChatviewError> {
    Loader::new().load_path(path.as_ref())
}

/// Decodes file bytes as UTF-8 text without a leading byte-order mark.
fn decode(bytes: &[u8], context: impl Into<String>) -> Result<&str, ChatviewError> {
    let content = std::str::from_utf8(bytes).map_err(|e| ChatviewError::utf8(context, e))?;
    Ok(strip_bom(content))
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix(BOM).unwrap_or(content)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
