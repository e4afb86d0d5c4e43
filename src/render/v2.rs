//! V2 record rendering.

use crate::config::ViewConfig;
use crate::record::{MessageKind, V2Message};
use crate::view::{Body, DisplayFragment, V2Body, V2Payload};

use super::RenderFragment;

impl RenderFragment for V2Message {
    fn render(&self, key: usize, config: &ViewConfig) -> DisplayFragment {
        let payload = match self.kind {
            MessageKind::Text => V2Payload::Text(self.text.clone()),
            MessageKind::Media => V2Payload::Media,
        };

        // Only the symbol is shown, never who reacted.
        let reactions = self
            .reactions
            .iter()
            .map(|r| r.reaction.clone())
            .collect();

        let date = self
            .timestamp_ms()
            .and_then(|ms| config.time_zone.calendar_date(ms));

        DisplayFragment::new(
            key,
            self.sender_name.clone(),
            date,
            Body::V2(V2Body {
                kind: self.kind,
                payload,
                reactions,
            }),
        )
    }
}
