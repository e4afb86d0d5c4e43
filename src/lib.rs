//! # Chatview
//!
//! A Rust library and CLI for reading Instagram / Messenger JSON chat exports
//! as a human-readable timeline: sender, date, text and media markers, call
//! durations and reactions.
//!
//! ## Overview
//!
//! Meta has shipped two message layouts:
//! - **Legacy**: snake_case records (`sender_name`, `timestamp_ms`,
//!   `content`, `call_duration`, ...)
//! - **V2**: camelCase records (`senderName`, `timestamp`, `type`, `text`,
//!   `reactions: [{actor, reaction}]`, ...)
//!
//! Every record is classified once, rendered through the matching path, and
//! printed. Records of neither shape are skipped without affecting the rest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatview::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut timeline = Timeline::new(ViewConfig::new().with_time_zone(TimeZoneSetting::Utc));
//!     timeline.load_path("message_1.json")?;
//!
//!     print!("{}", timeline.to_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`loader`] - bytes → messages array ([`Loader`](loader::Loader), [`load`](loader::load))
//! - [`detect`] - shape detection ([`detect`](detect::detect), [`classify`](detect::classify))
//! - [`record`] - typed legacy / V2 records and the mojibake fix
//! - [`render`] - record → [`DisplayFragment`], text writers
//! - [`view`] - fragment view-model ([`Body`](view::Body), [`CallDuration`](view::CallDuration))
//! - [`timeline`] - current snapshot, replaced on each load
//! - [`filter`] - date and sender filters
//! - [`config`] - [`ViewConfig`](config::ViewConfig), [`TimeZoneSetting`](config::TimeZoneSetting)
//! - [`error`] - [`ChatviewError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;
pub mod render;
pub mod timeline;
pub mod view;

// Re-export the main types at the crate root for convenience
pub use error::{ChatviewError, Result};
pub use view::DisplayFragment;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatview::prelude::*;
/// ```
pub mod prelude {
    pub use crate::DisplayFragment;

    // Error types
    pub use crate::error::{ChatviewError, Result};

    // Configuration
    pub use crate::config::{TimeZoneSetting, ViewConfig};

    // Loading and detection
    pub use crate::detect::{Classified, Record, Shape, classify, detect};
    pub use crate::loader::{Loader, RawRecord, load, load_path};

    // Rendering
    pub use crate::render::{
        RenderFragment, RenderStats, Rendered, render_records, to_text, write_text,
        write_text_file,
    };
    pub use crate::view::{Body, CallDuration, PresenceIcon};

    // Filtering and the current view
    pub use crate::filter::{FilterConfig, apply_filters};
    pub use crate::timeline::Timeline;
}
