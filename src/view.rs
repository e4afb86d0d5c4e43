//! Display fragments: the rendered view-model of one message.
//!
//! A [`DisplayFragment`] is what the renderer produces for every recognized
//! record and what the text writer prints. It knows nothing about the JSON
//! it came from besides the record's position in the source array.
//!
//! # Example
//!
//! ```
//! use chatview::view::{Body, CallDuration, DisplayFragment};
//! use chrono::NaiveDate;
//!
//! let fragment = DisplayFragment::new(
//!     0,
//!     "Alice",
//!     NaiveDate::from_ymd_opt(2021, 1, 5),
//!     Body::Call(CallDuration::from_seconds(45.0)),
//! );
//!
//! assert_eq!(fragment.date_label(), "2021.01.05");
//! assert_eq!(fragment.to_string(), "Sent: Alice\nDate: 2021.01.05\nCall: 📞 45 seconds\n");
//! ```

use std::fmt;

use chrono::NaiveDate;

use crate::record::MessageKind;

/// Date format of the `Date:` line, zero-padded month and day.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Shown when a timestamp falls outside the representable range.
pub const UNKNOWN_DATE: &str = "unknown";

/// Prefix glyph of a call line.
pub const CALL_GLYPH: &str = "📞";

/// Single glyph standing in for any number of V2 media attachments.
pub const MEDIA_GLYPH: &str = "🖼️";

/// One rendered message.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFragment {
    /// Position of the record in the source array.
    pub key: usize,
    /// Display name of the author.
    pub sender: String,
    /// Calendar date in the configured zone.
    pub date: Option<NaiveDate>,
    /// Kind-specific content.
    pub body: Body,
}

impl DisplayFragment {
    /// Creates a fragment from its parts.
    pub fn new(
        key: usize,
        sender: impl Into<String>,
        date: Option<NaiveDate>,
        body: Body,
    ) -> Self {
        Self {
            key,
            sender: sender.into(),
            date,
            body,
        }
    }

    /// Returns the formatted date, e.g. `2021.01.05`.
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string())
    }

    /// Returns `true` if this fragment renders a call.
    pub fn is_call(&self) -> bool {
        matches!(self.body, Body::Call(_))
    }
}

/// Prints the fragment as its block of lines:
///
/// ```text
/// Sent: Alice
/// Date: 2021.01.05
/// <body lines>
/// ```
impl fmt::Display for DisplayFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sent: {}", self.sender)?;
        writeln!(f, "Date: {}", self.date_label())?;
        write!(f, "{}", self.body)
    }
}

/// Kind-specific content of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A call, shown instead of any text or media markers.
    Call(CallDuration),
    /// Legacy text body with presence icons.
    Legacy(LegacyBody),
    /// V2 body with kind label and reaction symbols.
    V2(V2Body),
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Call(duration) => writeln!(f, "Call: {} {}", CALL_GLYPH, duration),
            Body::Legacy(body) => write!(f, "{}", body),
            Body::V2(body) => write!(f, "{}", body),
        }
    }
}

/// Legacy text body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegacyBody {
    /// Message text, absent for media-only messages.
    pub text: Option<String>,
    /// One icon per non-empty attachment category, in display order.
    pub icons: Vec<PresenceIcon>,
}

impl fmt::Display for LegacyBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.text {
            writeln!(f, "{}", text)?;
        }
        if !self.icons.is_empty() {
            let glyphs: Vec<&str> = self.icons.iter().map(|icon| icon.glyph()).collect();
            writeln!(f, "{}", glyphs.join(" "))?;
        }
        Ok(())
    }
}

/// Attachment categories flagged on legacy messages.
///
/// Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PresenceIcon {
    Photo,
    Gif,
    Reaction,
    Video,
}

impl PresenceIcon {
    /// Returns the glyph shown for this category.
    pub fn glyph(&self) -> &'static str {
        match self {
            PresenceIcon::Photo => "📸",
            PresenceIcon::Gif => "🎨",
            PresenceIcon::Reaction => "😀",
            PresenceIcon::Video => "🎥",
        }
    }

    /// Returns all categories in display order.
    pub fn all() -> &'static [PresenceIcon] {
        &[
            PresenceIcon::Photo,
            PresenceIcon::Gif,
            PresenceIcon::Reaction,
            PresenceIcon::Video,
        ]
    }
}

/// V2 body.
#[derive(Debug, Clone, PartialEq)]
pub struct V2Body {
    pub kind: MessageKind,
    pub payload: V2Payload,
    /// Reaction symbols in source order; actors are dropped.
    pub reactions: Vec<String>,
}

impl fmt::Display for V2Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {}", self.kind)?;
        match &self.payload {
            V2Payload::Text(text) => writeln!(f, "{}", text)?,
            V2Payload::Media => writeln!(f, "{}", MEDIA_GLYPH)?,
        }
        if !self.reactions.is_empty() {
            writeln!(f, "Reactions:")?;
            for reaction in &self.reactions {
                writeln!(f, "  {}", reaction)?;
            }
        }
        Ok(())
    }
}

/// What a V2 message shows under its kind label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum V2Payload {
    Text(String),
    /// Rendered as [`MEDIA_GLYPH`] no matter how many items are attached.
    Media,
}

/// A call length split into display segments.
///
/// ```
/// use chatview::view::CallDuration;
///
/// assert_eq!(CallDuration::from_seconds(3661.0).to_string(), "1 hours 1 minutes 1 seconds");
/// assert_eq!(CallDuration::from_seconds(3605.0).to_string(), "1 hours 5 seconds");
/// assert_eq!(CallDuration::from_seconds(45.0).to_string(), "45 seconds");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallDuration {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CallDuration {
    /// Splits a duration in seconds into whole hours, minutes (0-59) and
    /// rounded remaining seconds.
    pub fn from_seconds(duration: f64) -> Self {
        let hours = (duration / 3600.0).floor();
        let minutes = (duration / 60.0).floor() % 60.0;
        let seconds = round_half_up(duration - hours * 3600.0 - minutes * 60.0);

        Self {
            hours: hours as i64,
            minutes: minutes as i64,
            seconds: seconds as i64,
        }
    }

    /// Returns the total length in seconds.
    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Hours and minutes appear only when positive; seconds always appear.
impl fmt::Display for CallDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{} hours ", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{} minutes ", self.minutes)?;
        }
        write!(f, "{} seconds", self.seconds)
    }
}

/// Rounds to the nearest integer, halves toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}
