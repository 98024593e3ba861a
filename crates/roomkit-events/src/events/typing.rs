//! `m.typing`.

use crate::event::{EventBase, impl_event};
use crate::layers::TypingLayer;

/// Who is typing in a room right now.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingEvent {
    base: EventBase,
    pub typing: TypingLayer,
}

impl TypingEvent {
    pub const TYPE: &'static str = "m.typing";
}

impl Default for TypingEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            typing: TypingLayer::default(),
        }
    }
}

impl_event!(TypingEvent => [typing]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use roomkit_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn roundtrip() {
        let document = json!({
            "type": "m.typing",
            "room_id": "!room:example.org",
            "content": {"user_ids": ["@alice:example.org", "@bob:example.org"]}
        });
        let mut event = TypingEvent::default();
        event.populate_from_json(&document).unwrap();
        assert_eq!(event.typing.user_ids().len(), 2);
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn nobody_typing_still_writes_list() {
        let mut event = TypingEvent::default();
        event.typing.set_room_id("!room:example.org").unwrap();
        assert_eq!(
            event.to_json().unwrap(),
            json!({"type": "m.typing", "room_id": "!room:example.org", "content": {"user_ids": []}})
        );
    }

    #[test]
    fn room_id_is_mandatory() {
        let err = TypingEvent::default().to_json().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incomplete);
    }
}
