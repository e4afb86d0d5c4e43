//! Unified error types for chatview.
//!
//! This module provides a single [`ChatviewError`] enum that covers every way
//! loading an export or configuring the view can fail.
//!
//! Per-record problems (an unknown shape, a record missing a required field)
//! are *not* errors: the renderer skips those records and counts them in
//! [`RenderStats`](crate::render::RenderStats). Errors are reserved for
//! failures that leave nothing to show.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatview operations.
///
/// # Example
///
/// ```rust
/// use chatview::error::Result;
/// use chatview::DisplayFragment;
///
/// fn my_function() -> Result<Vec<DisplayFragment>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatviewError>;

/// The error type for all chatview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatviewError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - The output file cannot be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export file is not valid UTF-8 text.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// JSON parsing error without file context.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse an export file on disk.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is valid JSON but doesn't have the expected structure.
    ///
    /// This occurs when:
    /// - The top-level value is not an object
    /// - The messages field is missing
    /// - The messages field is not an array
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a filter.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Invalid time zone setting.
    #[error("Invalid time zone '{input}'. Expected one of: {expected}")]
    InvalidTimeZone {
        /// The invalid value that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatviewError {
    /// Creates a parse error for a chat export file.
    pub fn export_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatviewError::Parse {
            format: "chat export JSON",
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatviewError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error with context.
    pub fn utf8(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        ChatviewError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatviewError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid time zone error.
    pub fn invalid_time_zone(input: impl Into<String>) -> Self {
        ChatviewError::InvalidTimeZone {
            input: input.into(),
            expected: "local, utc, +HH:MM, -HHMM",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatviewError::Io(_))
    }

    /// Returns `true` if the input could not be decoded or parsed.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ChatviewError::Parse { .. } | ChatviewError::Json(_) | ChatviewError::Utf8 { .. }
        )
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatviewError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatviewError::InvalidDate { .. })
    }

    /// Returns `true` if this is a time zone error.
    pub fn is_invalid_time_zone(&self) -> bool {
        matches!(self, ChatviewError::InvalidTimeZone { .. })
    }
}
