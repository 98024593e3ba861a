//! `m.room.message`.

use roomkit_core::{Error, Result};
use serde_json::Value;
use tracing::debug;

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::RoomLayer;
use crate::message::{self, MessageContent};

/// Owns `content`, decoded through the message registry by `msgtype`.
///
/// Content whose `msgtype` is missing or unregistered is kept verbatim as
/// fallback and written back unchanged.
#[derive(Debug, Clone, Default)]
pub struct MessageLayer {
    content: Option<Box<dyn MessageContent>>,
    fallback: Option<Object>,
}

impl MessageLayer {
    pub fn content(&self) -> Option<&(dyn MessageContent + 'static)> {
        self.content.as_deref()
    }

    /// The typed content, if it is an `M`.
    pub fn get<M: MessageContent>(&self) -> Option<&M> {
        self.content.as_deref()?.downcast_ref::<M>()
    }

    pub fn set_content(&mut self, content: impl MessageContent) {
        self.content = Some(Box::new(content));
        self.fallback = None;
    }

    /// Raw content kept because no handler could decode it.
    pub fn fallback(&self) -> Option<&Object> {
        self.fallback.as_ref()
    }

    pub fn set_fallback(&mut self, content: Object) {
        self.content = None;
        self.fallback = Some(content);
    }

    /// The `msgtype` of the typed or fallback content.
    pub fn msgtype(&self) -> Option<&str> {
        match (&self.content, &self.fallback) {
            (Some(content), _) => content.msgtype(),
            (None, Some(fallback)) => fallback.get("msgtype").and_then(Value::as_str),
            (None, None) => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match (&self.content, &self.fallback) {
            (Some(content), _) => content.body(),
            (None, Some(fallback)) => fallback.get("body").and_then(Value::as_str),
            (None, None) => None,
        }
    }
}

impl Layer for MessageLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let content = json::content(json)?
            .ok_or_else(|| Error::incomplete("room message has no content"))?;
        match message::message_from_json(content)? {
            Some(typed) => {
                self.content = Some(typed);
                self.fallback = None;
            }
            None => {
                let msgtype = content.get("msgtype").and_then(Value::as_str);
                debug!(msgtype, "keeping undecoded message content");
                self.set_fallback(content.clone());
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        match (&self.content, &self.fallback) {
            (Some(content), _) => content.serialize_to_json(json::content_mut(json)?),
            (None, Some(fallback)) => {
                json::put(json, "content", Value::Object(fallback.clone()));
                Ok(())
            }
            (None, None) => Err(Error::incomplete("room message has no content")),
        }
    }
}

/// A message posted to a room.
#[derive(Debug, Clone)]
pub struct RoomMessageEvent {
    base: EventBase,
    pub message: MessageLayer,
    pub room: RoomLayer,
}

impl RoomMessageEvent {
    pub const TYPE: &'static str = "m.room.message";

    pub fn with_content(content: impl MessageContent) -> Self {
        let mut event = Self::default();
        event.message.set_content(content);
        event
    }
}

impl Default for RoomMessageEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            message: MessageLayer::default(),
            room: RoomLayer::default(),
        }
    }
}

impl_event!(RoomMessageEvent => [message, room]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use crate::message::{NoticeMessage, TextMessage};
    use roomkit_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn decodes_typed_content() {
        let document = json!({
            "type": "m.room.message",
            "event_id": "$m:example.org",
            "room_id": "!room:example.org",
            "sender": "@alice:example.org",
            "content": {"msgtype": "m.text", "body": "hello"},
            "unsigned": {"age": 10}
        });
        let mut event = RoomMessageEvent::default();
        event.populate_from_json(&document).unwrap();

        assert_eq!(event.message.get::<TextMessage>().unwrap().body(), Some("hello"));
        assert!(event.message.fallback().is_none());
        assert_eq!(event.room.age(), Some(10));
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn unknown_msgtype_roundtrips_verbatim() {
        let document = json!({
            "type": "m.room.message",
            "content": {
                "msgtype": "org.example.poll",
                "body": "Lunch?",
                "answers": ["pizza", "salad"]
            }
        });
        let mut event = RoomMessageEvent::default();
        event.populate_from_json(&document).unwrap();

        assert!(event.message.content().is_none());
        assert!(event.message.fallback().is_some());
        assert_eq!(event.message.msgtype(), Some("org.example.poll"));
        assert_eq!(event.message.body(), Some("Lunch?"));
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn content_without_msgtype_is_kept() {
        let document = json!({"type": "m.room.message", "content": {}});
        let mut event = RoomMessageEvent::default();
        event.populate_from_json(&document).unwrap();
        assert!(event.message.fallback().unwrap().is_empty());
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn missing_content_is_incomplete() {
        let mut event = RoomMessageEvent::default();
        let err = event
            .populate_from_json(&json!({"type": "m.room.message"}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incomplete);
        assert_eq!(event.to_json().unwrap_err().kind(), ErrorKind::Incomplete);
    }

    #[test]
    fn built_from_setters() {
        let mut event = RoomMessageEvent::with_content(NoticeMessage::new("build passed"));
        event.room.set_room_id("!ci:example.org").unwrap();
        insta::assert_json_snapshot!(event.to_json().unwrap(), @r###"
        {
          "content": {
            "body": "build passed",
            "msgtype": "m.notice"
          },
          "room_id": "!ci:example.org",
          "type": "m.room.message"
        }
        "###);
    }

    #[test]
    fn failing_content_stops_the_chain() {
        let mut event = RoomMessageEvent::with_content(TextMessage::default());
        event.room.set_room_id("!room:example.org").unwrap();

        let mut out = Object::new();
        let err = event.serialize_to_json(&mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incomplete);
        assert!(!out.contains_key("room_id"));
        assert!(!out.contains_key("type"));
    }
}
