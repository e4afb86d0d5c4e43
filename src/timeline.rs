//! The current view: one loaded export rendered into fragments.
//!
//! A [`Timeline`] owns a single snapshot of fragments. Every successful load
//! builds a complete new snapshot and swaps it in, so the last completed load
//! wins and readers never see a mix of two files. A failed load returns the
//! error and leaves the previous snapshot untouched.
//!
//! # Example
//!
//! ```rust
//! use chatview::config::{TimeZoneSetting, ViewConfig};
//! use chatview::timeline::Timeline;
//!
//! let mut timeline = Timeline::new(ViewConfig::new().with_time_zone(TimeZoneSetting::Utc));
//!
//! let stats = timeline.load_bytes(
//!     br#"{"messages": [{"sender_name": "Alice", "timestamp_ms": 1609848000000, "content": "Hi"}]}"#,
//! )?;
//! assert_eq!(stats.rendered(), 1);
//!
//! // A broken file does not blank the view
//! assert!(timeline.load_bytes(b"{").is_err());
//! assert_eq!(timeline.fragments().len(), 1);
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use std::path::Path;

use tracing::debug;

use crate::config::ViewConfig;
use crate::error::ChatviewError;
use crate::filter::FilterConfig;
use crate::loader::{Loader, RawRecord};
use crate::render::{self, RenderStats};
use crate::view::DisplayFragment;

/// Loaded and rendered chat export.
#[derive(Debug, Clone)]
pub struct Timeline {
    config: ViewConfig,
    loader: Loader,
    fragments: Vec<DisplayFragment>,
    stats: RenderStats,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new(config: ViewConfig) -> Self {
        let loader = Loader::with_field(config.messages_field.clone());
        Self {
            config,
            loader,
            fragments: Vec::new(),
            stats: RenderStats::default(),
        }
    }

    /// Returns the view configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the fragments of the current snapshot.
    pub fn fragments(&self) -> &[DisplayFragment] {
        &self.fragments
    }

    /// Returns the stats of the pass that produced the current snapshot.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Returns `true` if nothing is loaded or nothing rendered.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Loads an export from raw bytes, replacing the current snapshot.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<RenderStats, ChatviewError> {
        let records = self.loader.load(bytes)?;
        Ok(self.replace(&records))
    }

    /// Loads an export file, replacing the current snapshot.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<RenderStats, ChatviewError> {
        let records = self.loader.load_path(path.as_ref())?;
        Ok(self.replace(&records))
    }

    /// Renders `records` and swaps them in as the current snapshot.
    pub fn replace(&mut self, records: &[RawRecord]) -> RenderStats {
        let rendered = render::render_records(records, &self.config);
        debug!(
            previous = self.fragments.len(),
            current = rendered.fragments.len(),
            "replacing timeline snapshot"
        );
        self.fragments = rendered.fragments;
        self.stats = rendered.stats;
        self.stats
    }

    /// Drops the current snapshot.
    pub fn clear(&mut self) {
        self.fragments.clear();
        self.stats = RenderStats::default();
    }

    /// Returns the fragments matching `filter`, in view order.
    pub fn filtered(&self, filter: &FilterConfig) -> Vec<&DisplayFragment> {
        self.fragments.iter().filter(|f| filter.matches(f)).collect()
    }

    /// Renders the current snapshot as plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.fragments)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
