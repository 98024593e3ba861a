//! Type registries: wire type tag → handler.
//!
//! A [`TypeRegistry`] maps a type tag (`"m.room.member"`, `"m.text"`, ...) to
//! a [`Handler`] that constructs an empty value of the concrete type able to
//! decode and encode documents carrying that tag. The same mechanism backs
//! two independent registries: one for events (`dyn Event`) and one for
//! message contents (`dyn MessageContent`).
//!
//! Process-wide instances live behind [`register_type`], [`unregister_type`]
//! and [`get_handler`]. They are seeded with the built-in types on first use.
//! Register custom types at startup, before concurrent lookups begin.

use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};

use roomkit_core::{Error, Result};
use tracing::debug;

use crate::event::Event;

/// Associates a type tag with the constructor of a concrete type.
///
/// A handler can only be built for a type implementing the marshalling
/// contract, so the registry never holds a handler that cannot decode.
pub struct Handler<T: ?Sized> {
    type_name: &'static str,
    construct: fn(&str) -> Box<T>,
}

impl<T: ?Sized> Handler<T> {
    pub(crate) fn new(type_name: &'static str, construct: fn(&str) -> Box<T>) -> Self {
        Self {
            type_name,
            construct,
        }
    }

    /// The Rust type this handler constructs.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Constructs an empty value whose type tag is preset to `tag`.
    pub fn construct(&self, tag: &str) -> Box<T> {
        (self.construct)(tag)
    }
}

impl<T: ?Sized> Clone for Handler<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Handler<T> {}

impl<T: ?Sized> fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A mapping from type tag to [`Handler`].
pub struct TypeRegistry<T: ?Sized> {
    kind: &'static str,
    handlers: HashMap<String, Handler<T>>,
}

impl<T: ?Sized> TypeRegistry<T> {
    /// Creates an empty registry. `kind` names its entries in diagnostics.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for `tag`, replacing any previous handler.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidType` if `tag` is empty.
    pub fn register(&mut self, tag: &str, handler: Handler<T>) -> Result<()> {
        if tag.is_empty() {
            return Err(Error::invalid_type(format!(
                "cannot register a {} handler for an empty type tag",
                self.kind
            )));
        }
        if let Some(previous) = self.handlers.insert(tag.to_string(), handler) {
            debug!(
                kind = self.kind,
                tag,
                previous = previous.type_name(),
                replacement = handler.type_name(),
                "replaced registered handler"
            );
        }
        Ok(())
    }

    /// Removes the handler for `tag`. Absent tags are ignored.
    pub fn unregister(&mut self, tag: &str) -> Option<Handler<T>> {
        self.handlers.remove(tag)
    }

    /// Returns the handler for `tag`.
    ///
    /// A miss is logged, not treated as an error: servers routinely send
    /// types newer than this client.
    pub fn lookup(&self, tag: &str) -> Option<Handler<T>> {
        let handler = self.handlers.get(tag).copied();
        if handler.is_none() {
            debug!(kind = self.kind, tag, "no registered handler");
        }
        handler
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// All registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn seed(&mut self, tag: &'static str, handler: Handler<T>) {
        self.handlers.insert(tag.to_string(), handler);
    }
}

impl<T: ?Sized> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kind", &self.kind)
            .field("tags", &self.tags())
            .finish()
    }
}

impl TypeRegistry<dyn Event> {
    /// An event registry holding every built-in event type.
    pub fn with_builtin_events() -> Self {
        let mut registry = Self::new("event");
        for (tag, handler) in crate::events::builtin_handlers() {
            registry.seed(tag, handler);
        }
        registry
    }
}

static EVENT_TYPES: LazyLock<RwLock<TypeRegistry<dyn Event>>> =
    LazyLock::new(|| RwLock::new(TypeRegistry::with_builtin_events()));

/// Registers `handler` for `tag` in the process-wide event registry.
pub fn register_type(tag: &str, handler: Handler<dyn Event>) -> Result<()> {
    EVENT_TYPES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(tag, handler)
}

/// Removes `tag` from the process-wide event registry.
pub fn unregister_type(tag: &str) -> Option<Handler<dyn Event>> {
    EVENT_TYPES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .unregister(tag)
}

/// Looks up `tag` in the process-wide event registry.
pub fn get_handler(tag: &str) -> Option<Handler<dyn Event>> {
    EVENT_TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(tag)
}

/// Tags registered in the process-wide event registry, sorted.
pub fn registered_types() -> Vec<String> {
    EVENT_TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .tags()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{PresenceEvent, RoomMemberEvent, RoomNameEvent};
    use roomkit_core::ErrorKind;

    #[test]
    fn register_and_lookup() {
        let mut registry = TypeRegistry::<dyn Event>::new("event");
        assert!(registry.is_empty());
        registry
            .register("m.presence", Handler::event::<PresenceEvent>())
            .unwrap();

        let handler = registry.lookup("m.presence").unwrap();
        assert!(handler.type_name().ends_with("PresenceEvent"));
        let event = handler.construct("m.presence");
        assert_eq!(event.event_type(), Some("m.presence"));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = TypeRegistry::<dyn Event>::new("event");
        registry
            .register("m.custom", Handler::event::<RoomNameEvent>())
            .unwrap();
        registry
            .register("m.custom", Handler::event::<RoomMemberEvent>())
            .unwrap();

        assert_eq!(registry.len(), 1);
        let handler = registry.lookup("m.custom").unwrap();
        assert!(handler.type_name().ends_with("RoomMemberEvent"));
        let event = handler.construct("m.custom");
        assert!(event.downcast_ref::<RoomMemberEvent>().is_some());
    }

    #[test]
    fn unregister_removes_mapping() {
        let mut registry = TypeRegistry::<dyn Event>::new("event");
        registry
            .register("m.presence", Handler::event::<PresenceEvent>())
            .unwrap();
        assert!(registry.unregister("m.presence").is_some());
        assert!(registry.lookup("m.presence").is_none());
        assert!(registry.unregister("m.presence").is_none());
    }

    #[test]
    fn empty_tag_is_rejected() {
        let mut registry = TypeRegistry::<dyn Event>::new("event");
        let err = registry
            .register("", Handler::event::<PresenceEvent>())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert!(registry.is_empty());
    }

    #[test]
    fn constructed_value_carries_requested_tag() {
        let handler = Handler::<dyn Event>::event::<RoomNameEvent>();
        let event = handler.construct("org.example.name");
        assert_eq!(event.event_type(), Some("org.example.name"));
    }

    #[test]
    fn builtin_registry_is_seeded() {
        let registry = TypeRegistry::with_builtin_events();
        for tag in [
            "m.presence",
            "m.receipt",
            "m.typing",
            "m.tag",
            "m.room.message",
            "m.room.member",
            "m.room.redaction",
            "m.call.invite",
            "m.call.candidates",
            "m.room.third_party_invite",
        ] {
            assert!(registry.contains(tag), "{tag} missing");
        }
        let tags = registry.tags();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn global_registry_roundtrip() {
        let tag = "org.example.registry_test";
        assert!(get_handler(tag).is_none());
        register_type(tag, Handler::event::<PresenceEvent>()).unwrap();
        assert!(registered_types().iter().any(|t| t == tag));
        assert!(get_handler(tag).is_some());
        unregister_type(tag);
        assert!(get_handler(tag).is_none());
        assert!(get_handler("m.room.member").is_some());
    }
}
