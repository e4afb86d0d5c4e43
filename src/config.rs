//! Configuration types for loading and rendering.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ViewConfig`] - how an export is loaded and rendered
//! - [`TimeZoneSetting`] - which zone calendar dates are computed in
//!
//! # Example
//!
//! ```rust
//! use chatview::config::{TimeZoneSetting, ViewConfig};
//!
//! let config = ViewConfig::new()
//!     .with_time_zone(TimeZoneSetting::Utc)
//!     .with_oldest_first(true);
//!
//! assert!(config.oldest_first);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ChatviewError;

/// Name of the array field that holds message records in both export shapes.
pub const DEFAULT_MESSAGES_FIELD: &str = "messages";

/// Time zone used to turn epoch timestamps into calendar dates.
///
/// Two viewers in different zones see different dates for the same message,
/// so the zone is always explicit. [`Local`](TimeZoneSetting::Local) follows
/// the machine running the viewer; tests should use
/// [`Utc`](TimeZoneSetting::Utc) or [`Fixed`](TimeZoneSetting::Fixed).
///
/// # Example
///
/// ```rust
/// use chatview::config::TimeZoneSetting;
///
/// let tz: TimeZoneSetting = "+05:30".parse().unwrap();
/// assert_eq!(tz, TimeZoneSetting::Fixed { offset_seconds: 19_800 });
/// assert_eq!(tz.to_string(), "+05:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneSetting {
    /// The viewer's local zone
    #[default]
    Local,

    /// Coordinated Universal Time
    Utc,

    /// A fixed offset east of UTC
    Fixed {
        /// Offset in seconds, positive east of UTC
        offset_seconds: i32,
    },
}

impl TimeZoneSetting {
    /// Creates a fixed-offset setting from hours and minutes east of UTC.
    ///
    /// The sign of `hours` carries over to `minutes`, so `fixed(-3, 30)` is
    /// `-03:30`. Returns `None` if the offset is out of range (±24h).
    pub fn fixed(hours: i32, minutes: i32) -> Option<Self> {
        let offset_seconds = if hours < 0 {
            hours * 3600 - minutes * 60
        } else {
            hours * 3600 + minutes * 60
        };
        FixedOffset::east_opt(offset_seconds).map(|_| TimeZoneSetting::Fixed { offset_seconds })
    }

    /// Returns the calendar date of an epoch-milliseconds timestamp in this zone.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn calendar_date(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        match self {
            TimeZoneSetting::Local => chrono::Local
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .map(|dt| dt.date_naive()),
            TimeZoneSetting::Utc => {
                DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
            }
            TimeZoneSetting::Fixed { offset_seconds } => FixedOffset::east_opt(*offset_seconds)?
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .map(|dt| dt.date_naive()),
        }
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSetting::Local => write!(f, "local"),
            TimeZoneSetting::Utc => write!(f, "utc"),
            TimeZoneSetting::Fixed { offset_seconds } => {
                let sign = if *offset_seconds < 0 { '-' } else { '+' };
                let abs = offset_seconds.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}

impl FromStr for TimeZoneSetting {
    type Err = ChatviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(TimeZoneSetting::Local),
            "utc" | "z" => Ok(TimeZoneSetting::Utc),
            _ => parse_offset(trimmed)
                .map(|offset_seconds| TimeZoneSetting::Fixed { offset_seconds })
                .ok_or_else(|| ChatviewError::invalid_time_zone(s)),
        }
    }
}

/// Parses `+HH`, `+HHMM` or `+HH:MM` (or the `-` forms) into seconds east of UTC.
fn parse_offset(s: &str) -> Option<i32> {
    if !s.is_ascii() {
        return None;
    }

    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let rest = &s[1..];

    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };

    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    let seconds = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(seconds).map(|_| seconds)
}

/// Configuration for loading and rendering a chat export.
///
/// # Example
///
/// ```rust
/// use chatview::config::ViewConfig;
///
/// let config = ViewConfig::new()
///     .with_fix_encoding(false)
///     .with_messages_field("messages");
///
/// assert!(!config.fix_encoding);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Zone used for calendar dates (default: local)
    pub time_zone: TimeZoneSetting,

    /// Repair Meta's Latin-1 mojibake in legacy sender names and text (default: true)
    pub fix_encoding: bool,

    /// Reverse the source order; legacy exports are stored newest first (default: false)
    pub oldest_first: bool,

    /// Top-level field holding the message array (default: "messages")
    pub messages_field: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            time_zone: TimeZoneSetting::Local,
            fix_encoding: true,
            oldest_first: false,
            messages_field: DEFAULT_MESSAGES_FIELD.to_string(),
        }
    }
}

impl ViewConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time zone used for calendar dates.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZoneSetting) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Enables or disables the encoding fix.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    /// Sets whether the timeline is shown oldest message first.
    #[must_use]
    pub fn with_oldest_first(mut self, oldest_first: bool) -> Self {
        self.oldest_first = oldest_first;
        self
    }

    /// Sets the name of the field holding the message array.
    #[must_use]
    pub fn with_messages_field(mut self, field: impl Into<String>) -> Self {
        self.messages_field = field.into();
        self
    }
}
