//! Command-line interface definition using clap.
//!
//! [`Args`] maps one-to-one onto the library configuration types:
//! [`Args::view_config`] builds a [`ViewConfig`] and
//! [`Args::filter_config`] builds a [`FilterConfig`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::{TimeZoneSetting, ViewConfig};
use crate::error::ChatviewError;
use crate::filter::FilterConfig;

/// Render an Instagram / Messenger JSON chat export as a readable timeline.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatview message_1.json
    chatview message_1.json --tz utc -o timeline.txt
    chatview inbox.json --from Alice --after 2021-01-01
    chatview message_1.json --oldest-first --tz=-05:00")]
pub struct Args {
    /// Path to the exported JSON file
    pub input: PathBuf,

    /// Write the timeline to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Time zone for message dates: local, utc, or an offset like +05:30
    #[arg(long, value_name = "ZONE", default_value = "local", allow_hyphen_values = true)]
    pub tz: String,

    /// Show only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Show only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Show only messages from this sender
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Show the oldest message first (exports are stored newest first)
    #[arg(long)]
    pub oldest_first: bool,

    /// Keep text exactly as exported, without repairing Meta's mojibake
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Top-level field that holds the message array
    #[arg(long, value_name = "NAME", default_value = "messages")]
    pub field: String,

    /// Don't print the header and summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the view configuration from the parsed flags.
    pub fn view_config(&self) -> Result<ViewConfig, ChatviewError> {
        let time_zone: TimeZoneSetting = self.tz.parse()?;
        Ok(ViewConfig::new()
            .with_time_zone(time_zone)
            .with_fix_encoding(!self.no_fix_encoding)
            .with_oldest_first(self.oldest_first)
            .with_messages_field(self.field.clone()))
    }

    /// Builds the filter configuration from the parsed flags.
    pub fn filter_config(&self) -> Result<FilterConfig, ChatviewError> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        Ok(filter)
    }
}
