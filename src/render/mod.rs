//! Rendering of classified records into display fragments.
//!
//! - [`legacy`] - legacy records (text, presence icons, calls)
//! - [`v2`] - V2 records (kind label, media glyph, reaction symbols)
//! - [`text`] - writes fragments out as a plain-text timeline
//!
//! [`render_records`] drives the whole pass over a loaded messages array:
//! every record is classified once, recognized records are rendered, and
//! unknown or malformed records are skipped without affecting their
//! neighbors.
//!
//! # Example
//!
//! ```rust
//! use chatview::config::{TimeZoneSetting, ViewConfig};
//! use chatview::render::render_records;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"sender_name": "Alice", "timestamp_ms": 1609848000000i64, "content": "Hi"}),
//!     json!({"author": "nobody"}),
//!     json!({"senderName": "Bob", "timestamp": 1609848000000i64, "type": "text", "text": "Hey"}),
//! ];
//!
//! let config = ViewConfig::new().with_time_zone(TimeZoneSetting::Utc);
//! let rendered = render_records(&records, &config);
//!
//! assert_eq!(rendered.fragments.len(), 2);
//! assert_eq!(rendered.stats.unknown, 1);
//! assert_eq!(rendered.fragments[1].key, 2);
//! ```

pub mod legacy;
pub mod text;
pub mod v2;

pub use text::{to_text, write_text, write_text_file};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::ViewConfig;
use crate::detect::{Classified, Record, Shape, classify};
use crate::view::{Body, CallDuration, DisplayFragment};

/// Turns a typed record into a display fragment.
pub trait RenderFragment {
    /// Renders `self`, which sits at position `key` in the source array.
    fn render(&self, key: usize, config: &ViewConfig) -> DisplayFragment;
}

impl RenderFragment for Record {
    fn render(&self, key: usize, config: &ViewConfig) -> DisplayFragment {
        match self {
            Record::Legacy(msg) => msg.render(key, config),
            Record::V2(msg) => msg.render(key, config),
        }
    }
}

/// Builds the body for a call of `duration_seconds`.
pub fn render_call(duration_seconds: f64) -> Body {
    Body::Call(CallDuration::from_seconds(duration_seconds))
}

/// Counts from a single rendering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Records in the source array.
    pub total: usize,
    /// Records rendered through the legacy path.
    pub legacy: usize,
    /// Records rendered through the V2 path.
    pub v2: usize,
    /// Records matching neither shape.
    pub unknown: usize,
    /// Records with a recognized shape but unusable fields.
    pub invalid: usize,
}

impl RenderStats {
    /// Returns the number of fragments produced.
    pub fn rendered(&self) -> usize {
        self.legacy + self.v2
    }

    /// Returns the number of records left out of the view.
    pub fn skipped(&self) -> usize {
        self.unknown + self.invalid
    }
}

/// Fragments and stats from one rendering pass.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub fragments: Vec<DisplayFragment>,
    pub stats: RenderStats,
}

/// Classifies and renders every record in `records`.
///
/// Fragments keep source order unless [`ViewConfig::oldest_first`] is set,
/// in which case the order is reversed. Fragment keys always refer to the
/// source position.
pub fn render_records(records: &[Value], config: &ViewConfig) -> Rendered {
    let mut stats = RenderStats {
        total: records.len(),
        ..RenderStats::default()
    };
    let mut fragments = Vec::with_capacity(records.len());

    for (key, raw) in records.iter().enumerate() {
        match classify(raw) {
            Classified::Record(record) => {
                match record.shape() {
                    Shape::Legacy => stats.legacy += 1,
                    Shape::V2 => stats.v2 += 1,
                    Shape::Unknown => {}
                }
                fragments.push(record.render(key, config));
            }
            Classified::Unknown => {
                stats.unknown += 1;
                trace!(key, "skipping record with unknown shape");
            }
            Classified::Invalid { shape, error } => {
                stats.invalid += 1;
                warn!(key, %shape, %error, "skipping malformed record");
            }
        }
    }

    if config.oldest_first {
        fragments.reverse();
    }

    debug!(
        total = stats.total,
        legacy = stats.legacy,
        v2 = stats.v2,
        skipped = stats.skipped(),
        "rendered records"
    );

    Rendered { fragments, stats }
}
