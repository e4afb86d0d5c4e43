//! Legacy record rendering.
//!
//! A legacy message is either a call (non-zero `call_duration`) or a text
//! body with one presence icon per non-empty attachment category. `share`,
//! `is_unsent` and `sticker` are never shown.

use crate::config::ViewConfig;
use crate::record::{LegacyMessage, fix_mojibake_encoding};
use crate::view::{Body, DisplayFragment, LegacyBody, PresenceIcon};

use super::{RenderFragment, render_call};

impl RenderFragment for LegacyMessage {
    fn render(&self, key: usize, config: &ViewConfig) -> DisplayFragment {
        let repair = |s: &str| {
            if config.fix_encoding {
                fix_mojibake_encoding(s)
            } else {
                s.to_string()
            }
        };

        let body = match self.call_seconds() {
            Some(seconds) => render_call(seconds),
            None => Body::Legacy(LegacyBody {
                text: self.content.as_deref().map(repair),
                icons: presence_icons(self),
            }),
        };

        DisplayFragment::new(
            key,
            repair(&self.sender_name),
            config.time_zone.calendar_date(self.timestamp_ms),
            body,
        )
    }
}

/// Returns one icon per non-empty attachment category, in display order.
pub fn presence_icons(msg: &LegacyMessage) -> Vec<PresenceIcon> {
    PresenceIcon::all()
        .iter()
        .copied()
        .filter(|icon| match icon {
            PresenceIcon::Photo => msg.has_photos(),
            PresenceIcon::Gif => msg.has_gifs(),
            PresenceIcon::Reaction => msg.has_reactions(),
            PresenceIcon::Video => msg.has_videos(),
        })
        .collect()
}
