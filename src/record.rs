//! Typed message records for both export shapes.
//!
//! Meta has shipped two message layouts over the years:
//!
//! - **Legacy**: snake_case keys (`sender_name`, `timestamp_ms`, `content`,
//!   `call_duration`, ...). Text in these files is UTF-8 that was re-encoded
//!   as Latin-1, see [`fix_mojibake_encoding`].
//! - **V2**: camelCase keys (`senderName`, `timestamp`, `text`, `type`,
//!   `reactions: [{actor, reaction}]`, ...).
//!
//! Records are deserialized once and never mutated afterwards. Only the
//! fields that identify a record (sender, timestamp, V2 `type`) are strict;
//! optional fields read `null` as empty and never-rendered fields accept any
//! JSON value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Legacy message record.
///
/// Optional sequences keep the distinction between "absent" (`None`) and
/// "present but empty" (`Some(vec![])`); only non-empty ones are displayed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyMessage {
    pub sender_name: String,
    /// Epoch milliseconds; fractional values are truncated toward zero.
    #[serde(deserialize_with = "epoch_millis")]
    pub timestamp_ms: i64,
    #[serde(default)]
    pub content: Option<String>,
    /// Call length in seconds; zero or absent when the message is not a call.
    #[serde(default)]
    pub call_duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_geoblocked_for_viewer: bool,
    #[serde(default)]
    pub reactions: Option<Vec<Value>>,
    #[serde(default)]
    pub photos: Option<Vec<Value>>,
    #[serde(default)]
    pub gifs: Option<Vec<Value>>,
    #[serde(default)]
    pub videos: Option<Vec<Value>>,

    // Recognized but never rendered.
    #[serde(default)]
    pub share: Option<Value>,
    #[serde(default)]
    pub is_unsent: Option<Value>,
    #[serde(default)]
    pub sticker: Option<Value>,
}

impl LegacyMessage {
    /// Returns the call duration when this message is a call.
    ///
    /// A duration counts only when present, non-zero and not NaN.
    pub fn call_seconds(&self) -> Option<f64> {
        self.call_duration.filter(|d| *d != 0.0 && !d.is_nan())
    }

    /// Returns `true` if the message has at least one photo.
    pub fn has_photos(&self) -> bool {
        non_empty(self.photos.as_deref())
    }

    /// Returns `true` if the message has at least one gif.
    pub fn has_gifs(&self) -> bool {
        non_empty(self.gifs.as_deref())
    }

    /// Returns `true` if the message has at least one reaction.
    pub fn has_reactions(&self) -> bool {
        non_empty(self.reactions.as_deref())
    }

    /// Returns `true` if the message has at least one video.
    pub fn has_videos(&self) -> bool {
        non_empty(self.videos.as_deref())
    }
}

fn non_empty(items: Option<&[Value]>) -> bool {
    items.is_some_and(|items| !items.is_empty())
}

/// Body kind of a V2 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Media,
}

impl MessageKind {
    /// Returns the label exactly as it appears in the export.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Media => "media",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single V2 reaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct V2Reaction {
    pub actor: String,
    pub reaction: String,
}

/// V2 message record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V2Message {
    /// Parsed for compatibility; has no effect on rendering.
    #[serde(default)]
    pub is_unsent: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reactions: Vec<V2Reaction>,
    pub sender_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Epoch milliseconds.
    #[serde(alias = "timestampEpoch")]
    pub timestamp: f64,
    #[serde(rename = "type", alias = "kind")]
    pub kind: MessageKind,
}

impl V2Message {
    /// Returns the timestamp as whole epoch milliseconds, truncated toward zero.
    pub fn timestamp_ms(&self) -> Option<i64> {
        if self.timestamp.is_finite() {
            Some(self.timestamp.trunc() as i64)
        } else {
            None
        }
    }
}

/// Reads `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads an epoch-milliseconds number written either as an integer or a float.
fn epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Whole(i64),
        Fractional(f64),
    }

    Ok(match Millis::deserialize(deserializer)? {
        Millis::Whole(ms) => ms,
        Millis::Fractional(ms) => ms.trunc() as i64,
    })
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Legacy exports store each UTF-8 byte as a separate Unicode codepoint,
/// so "Привет" becomes "ÐŸÑ€Ð¸Ð²ÐµÑ‚". This reverses that by taking each char
/// as its byte value and decoding the bytes as UTF-8.
///
/// The input is returned unchanged when it contains a char above U+00FF (it
/// cannot be mojibake) or when the bytes are not valid UTF-8.
///
/// # Example
///
/// ```rust
/// use chatview::record::fix_mojibake_encoding;
///
/// assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
/// assert_eq!(fix_mojibake_encoding("Ã©tÃ©"), "été");
/// assert_eq!(fix_mojibake_encoding("👍"), "👍");
/// ```
pub fn fix_mojibake_encoding(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }

    let bytes: Option<Vec<u8>> = s.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    bytes
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_encoding_ascii() {
        assert_eq!(fix_mojibake_encoding("Hello"), "Hello");
        assert_eq!(fix_mojibake_encoding("Test 123"), "Test 123");
    }

    #[test]
    fn test_fix_encoding_cyrillic() {
        let mojibake: String = "Привет".bytes().map(char::from).collect();
        assert_eq!(fix_mojibake_encoding(&mojibake), "Привет");
    }

    #[test]
    fn test_fix_encoding_emoji() {
        let mojibake: String = "😀".bytes().map(char::from).collect();
        assert_eq!(fix_mojibake_encoding(&mojibake), "😀");
    }

    #[test]
    fn test_fix_encoding_leaves_real_unicode() {
        assert_eq!(fix_mojibake_encoding("❤️"), "❤️");
        assert_eq!(fix_mojibake_encoding("日本語"), "日本語");
        // Latin-1 text that is not valid UTF-8 when reinterpreted
        assert_eq!(fix_mojibake_encoding("café"), "café");
    }

    #[test]
    fn test_legacy_deserialize_minimal() {
        let json = r#"{"sender_name": "Alice", "timestamp_ms": 1609848000000}"#;
        let msg: LegacyMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender_name, "Alice");
        assert!(msg.content.is_none());
        assert!(msg.call_seconds().is_none());
        assert!(!msg.has_photos());
        assert!(!msg.is_geoblocked_for_viewer);
    }

    #[test]
    fn test_legacy_present_but_empty_sequences() {
        let json = r#"{"sender_name": "A", "timestamp_ms": 0, "photos": [], "gifs": null, "videos": [{"uri": "v.mp4"}]}"#;
        let msg: LegacyMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.photos, Some(vec![]));
        assert!(!msg.has_photos());
        assert!(msg.gifs.is_none());
        assert!(msg.has_videos());
    }

    #[test]
    fn test_legacy_call_seconds() {
        let call = |d: &str| {
            let json = format!(r#"{{"sender_name": "A", "timestamp_ms": 0, "call_duration": {d}}}"#);
            serde_json::from_str::<LegacyMessage>(&json).unwrap().call_seconds()
        };
        assert_eq!(call("0"), None);
        assert_eq!(call("45"), Some(45.0));
        assert_eq!(call("12.5"), Some(12.5));
    }

    #[test]
    fn test_legacy_ignored_fields_parse() {
        let json = r#"{
            "sender_name": "A", "timestamp_ms": 0,
            "share": {"link": "https://example.com", "share_text": "look"},
            "is_unsent": true,
            "sticker": {"uri": "s.png"}
        }"#;
        let msg: LegacyMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.share.unwrap()["link"], "https://example.com");
        assert_eq!(msg.is_unsent, Some(Value::Bool(true)));
    }

    #[test]
    fn test_legacy_lenient_fields() {
        let json = r#"{
            "sender_name": "A", "timestamp_ms": 1609848000000.7,
            "is_geoblocked_for_viewer": null,
            "share": "https://example.com",
            "is_unsent": 0,
            "photos": null
        }"#;
        let msg: LegacyMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.timestamp_ms, 1_609_848_000_000);
        assert!(!msg.is_geoblocked_for_viewer);
        assert!(!msg.has_photos());
    }

    #[test]
    fn test_legacy_timestamp_still_required() {
        let missing = r#"{"sender_name": "A"}"#;
        let text = r#"{"sender_name": "A", "timestamp_ms": "yesterday"}"#;
        assert!(serde_json::from_str::<LegacyMessage>(missing).is_err());
        assert!(serde_json::from_str::<LegacyMessage>(text).is_err());
    }

    #[test]
    fn test_v2_deserialize() {
        let json = r#"{
            "isUnsent": false,
            "media": [{"uri": "a.jpg"}],
            "reactions": [{"actor": "B", "reaction": "👍"}],
            "senderName": "Alice",
            "text": "",
            "timestamp": 1609848000000,
            "type": "media"
        }"#;
        let msg: V2Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.kind, MessageKind::Media);
        assert_eq!(msg.reactions[0].reaction, "👍");
        assert_eq!(msg.timestamp_ms(), Some(1_609_848_000_000));
    }

    #[test]
    fn test_v2_aliases_and_defaults() {
        let json = r#"{"senderName": "Bob", "timestampEpoch": 1.5, "kind": "text"}"#;
        let msg: V2Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.kind, MessageKind::Text);
        assert!(msg.text.is_empty());
        assert!(msg.media.is_empty());
        assert!(msg.reactions.is_empty());
        assert!(msg.is_unsent.is_none());
        assert_eq!(msg.timestamp_ms(), Some(1));
    }

    #[test]
    fn test_v2_null_fields_read_as_empty() {
        let json = r#"{"senderName": "Bob", "timestamp": 0, "type": "text",
            "isUnsent": null, "media": null, "reactions": null, "text": null}"#;
        let msg: V2Message = serde_json::from_str(json).unwrap();
        assert!(msg.text.is_empty());
        assert!(msg.media.is_empty());
        assert!(msg.reactions.is_empty());
    }

    #[test]
    fn test_v2_unknown_kind_rejected() {
        let json = r#"{"senderName": "Bob", "timestamp": 0, "type": "sticker"}"#;
        assert!(serde_json::from_str::<V2Message>(json).is_err());
    }

    #[test]
    fn test_message_kind_label() {
        assert_eq!(MessageKind::Text.to_string(), "text");
        assert_eq!(MessageKind::Media.as_str(), "media");
    }
}
