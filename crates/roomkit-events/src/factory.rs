//! Building events from untyped JSON.

use roomkit_core::{Error, Result};
use serde_json::Value;
use tracing::trace;

use crate::event::Event;
use crate::json;
use crate::registry::{Handler, TypeRegistry, get_handler};

/// The tag to build `json` as: `explicit_tag` if given, else the document's
/// `type`.
fn effective_tag<'a>(explicit_tag: Option<&'a str>, json: &'a Value) -> Result<&'a str> {
    if let Some(tag) = explicit_tag {
        return Ok(tag);
    }
    let object = json
        .as_object()
        .ok_or_else(|| Error::invalid_format("event JSON must be an object"))?;
    json::get_str(object, "type")?.ok_or_else(|| Error::incomplete("event JSON has no type"))
}

fn no_handler(tag: &str) -> Error {
    Error::invalid_type(format!("no registered handler for event type {tag:?}"))
}

fn build(handler: Handler<dyn Event>, tag: &str, json: &Value) -> Result<Box<dyn Event>> {
    trace!(tag, handler = handler.type_name(), "constructing event");
    let mut event = handler.construct(tag);
    event.populate_from_json(json)?;
    Ok(event)
}

impl TypeRegistry<dyn Event> {
    /// Constructs and populates the event described by `json`.
    ///
    /// The type comes from `explicit_tag` when given, otherwise from the
    /// document's `type` key. When both are present they must agree; that is
    /// checked while populating.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `json` is not an object or `type` is not a string
    /// - `Incomplete` if no tag is given and the document has no `type`
    /// - `InvalidType` if no handler is registered for the tag, or the tags
    ///   disagree
    /// - anything the event's populate chain reports
    pub fn new_from_json(&self, explicit_tag: Option<&str>, json: &Value) -> Result<Box<dyn Event>> {
        let tag = effective_tag(explicit_tag, json)?;
        let handler = self.lookup(tag).ok_or_else(|| no_handler(tag))?;
        build(handler, tag, json)
    }

    /// Parses `text` and builds the event it describes.
    pub fn new_from_str(&self, explicit_tag: Option<&str>, text: &str) -> Result<Box<dyn Event>> {
        let json: Value = serde_json::from_str(text)?;
        self.new_from_json(explicit_tag, &json)
    }
}

/// Builds an event through the process-wide registry.
///
/// The registry lock is released before the event is populated, so populate
/// code may itself use the registry.
///
/// See [`TypeRegistry::new_from_json`].
pub fn new_from_json(explicit_tag: Option<&str>, json: &Value) -> Result<Box<dyn Event>> {
    let tag = effective_tag(explicit_tag, json)?;
    let handler = get_handler(tag).ok_or_else(|| no_handler(tag))?;
    build(handler, tag, json)
}

/// Parses `text` and builds an event through the process-wide registry.
pub fn new_from_str(explicit_tag: Option<&str>, text: &str) -> Result<Box<dyn Event>> {
    let json: Value = serde_json::from_str(text)?;
    new_from_json(explicit_tag, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventBase, Layer, impl_event};
    use crate::events::{Membership, RoomMemberEvent, RoomNameEvent};
    use crate::json::Object;
    use crate::registry::{register_type, unregister_type};
    use roomkit_core::ErrorKind;
    use serde_json::json;

    /// Registers another event type while it is being populated.
    #[derive(Debug, Default)]
    struct RegisteringLayer;

    impl Layer for RegisteringLayer {
        fn populate(&mut self, _json: &Object) -> Result<()> {
            register_type("org.example.registered_late", Handler::event::<RoomNameEvent>())
        }

        fn serialize(&self, _json: &mut Object) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct RegisteringEvent {
        base: EventBase,
        registering: RegisteringLayer,
    }

    impl Default for RegisteringEvent {
        fn default() -> Self {
            Self {
                base: EventBase::new("org.example.registering"),
                registering: RegisteringLayer,
            }
        }
    }

    impl_event!(RegisteringEvent => [registering]);

    fn member_json() -> Value {
        json!({
            "type": "m.room.member",
            "state_key": "@alice:example.org",
            "content": {"membership": "join"}
        })
    }

    #[test]
    fn builds_from_document_type() {
        let event = new_from_json(None, &member_json()).unwrap();
        assert_eq!(event.event_type(), Some("m.room.member"));
        let member = event.downcast_ref::<RoomMemberEvent>().unwrap();
        assert_eq!(member.membership(), Some(Membership::Join));
    }

    #[test]
    fn explicit_tag_must_agree() {
        assert!(new_from_json(Some("m.room.member"), &member_json()).is_ok());

        let err = new_from_json(Some("m.room.name"), &member_json()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn explicit_tag_fills_missing_type() {
        let event = new_from_json(
            Some("m.room.name"),
            &json!({"state_key": "", "content": {"name": "Lobby"}}),
        )
        .unwrap();
        let name = event.downcast_ref::<RoomNameEvent>().unwrap();
        assert_eq!(name.content.name.as_deref(), Some("Lobby"));
        assert_eq!(event.to_json().unwrap()["type"], "m.room.name");
    }

    #[test]
    fn missing_type_is_incomplete() {
        let err = new_from_json(None, &json!({"content": {}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incomplete);
    }

    #[test]
    fn non_string_type_is_invalid_format() {
        let err = new_from_json(None, &json!({"type": 7})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn non_object_is_invalid_format() {
        let err = new_from_json(None, &json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);

        let err = new_from_json(Some("m.room.member"), &json!("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn unknown_type_on_empty_registry() {
        let registry = TypeRegistry::<dyn Event>::new("event");
        let err = registry.new_from_json(None, &member_json()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert!(err.to_string().contains("m.room.member"));
    }

    #[test]
    fn populate_errors_propagate() {
        let err = new_from_json(
            None,
            &json!({"type": "m.room.member", "content": {"membership": 3}}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn custom_registry_uses_its_own_handlers() {
        let mut registry = TypeRegistry::<dyn Event>::new("event");
        registry
            .register("org.example.member", Handler::event::<RoomMemberEvent>())
            .unwrap();
        let event = registry
            .new_from_json(
                None,
                &json!({
                    "type": "org.example.member",
                    "state_key": "@bob:example.org",
                    "content": {"membership": "leave"}
                }),
            )
            .unwrap();
        assert!(event.is::<RoomMemberEvent>());
        assert_eq!(event.to_json().unwrap()["type"], "org.example.member");
    }

    #[test]
    fn parses_text() {
        let (text, len) = new_from_json(None, &member_json())
            .unwrap()
            .to_json_string()
            .unwrap();
        assert_eq!(len, text.len());
        let event = new_from_str(None, &text).unwrap();
        assert_eq!(event.to_json().unwrap(), member_json());

        let err = new_from_str(None, "{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn populate_may_use_the_global_registry() {
        register_type("org.example.registering", Handler::event::<RegisteringEvent>()).unwrap();

        let event = new_from_json(None, &json!({"type": "org.example.registering"})).unwrap();
        assert!(event.is::<RegisteringEvent>());
        assert!(get_handler("org.example.registered_late").is_some());

        unregister_type("org.example.registering");
        unregister_type("org.example.registered_late");
    }
}
