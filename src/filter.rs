//! Filter rendered fragments by date range and sender.
//!
//! Filters run on [`DisplayFragment`]s, after rendering, so date bounds
//! compare against the calendar date the viewer actually sees (in the
//! configured time zone).
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Fragments on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Fragments on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Fragments from specific user |
//!
//! # Example
//!
//! ```
//! use chatview::filter::{FilterConfig, apply_filters};
//! use chatview::view::{Body, DisplayFragment, LegacyBody};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatview::Result<()> {
//! let body = Body::Legacy(LegacyBody::default());
//! let fragments = vec![
//!     DisplayFragment::new(0, "Alice", NaiveDate::from_ymd_opt(2021, 1, 5), body.clone()),
//!     DisplayFragment::new(1, "Bob", NaiveDate::from_ymd_opt(2021, 6, 1), body.clone()),
//!     DisplayFragment::new(2, "alice", NaiveDate::from_ymd_opt(2021, 6, 2), body),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_sender("ALICE")
//!     .with_date_from("2021-02-01")?;
//!
//! let filtered = apply_filters(fragments, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].key, 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Fragments without a date are **excluded** when date filters are active
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::error::ChatviewError;
use crate::view::DisplayFragment;

/// Configuration for filtering fragments by date and sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only fragments dated on or after this day.
    pub after: Option<NaiveDate>,

    /// Include only fragments dated on or before this day.
    pub before: Option<NaiveDate>,

    /// Include only fragments from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatviewError> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatviewError> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `fragment` passes every active filter.
    pub fn matches(&self, fragment: &DisplayFragment) -> bool {
        if let Some(ref from) = self.from {
            if !fragment.sender.eq_ignore_ascii_case(from) {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = fragment.date else {
                return false;
            };
            if self.after.is_some_and(|after| date < after) {
                return false;
            }
            if self.before.is_some_and(|before| date > before) {
                return false;
            }
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatviewError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatviewError::invalid_date(date_str))
}

/// Keeps only the fragments matching all active filters, in order.
pub fn apply_filters(
    fragments: Vec<DisplayFragment>,
    config: &FilterConfig,
) -> Vec<DisplayFragment> {
    if !config.is_active() {
        return fragments;
    }

    fragments.into_iter().filter(|f| config.matches(f)).collect()
}
