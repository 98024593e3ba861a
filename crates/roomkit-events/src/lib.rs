//! Event type registry and layered JSON marshalling for roomkit.
//!
//! Every wire event is a JSON object with a `type` tag, a handful of
//! envelope keys and a nested `content` object. This crate maps tags to
//! concrete Rust types through a [`TypeRegistry`], builds those types from
//! untyped JSON with [`new_from_json`], and writes them back with
//! [`Event::to_json`].
//!
//! ```
//! use roomkit_events::{Event, events::RoomMemberEvent};
//! use serde_json::json;
//!
//! let event = roomkit_events::new_from_json(None, &json!({
//!     "type": "m.room.member",
//!     "state_key": "@alice:example.org",
//!     "content": {"membership": "join"}
//! }))?;
//! let member = event.downcast_ref::<RoomMemberEvent>().unwrap();
//! assert_eq!(member.user_id(), Some("@alice:example.org"));
//! # Ok::<(), roomkit_core::Error>(())
//! ```

pub mod event;
pub mod events;
pub mod factory;
pub mod json;
pub mod layers;
pub mod message;
pub mod registry;

pub use event::{Event, EventBase, Layer};
pub use factory::{new_from_json, new_from_str};
pub use message::{
    MessageContent, get_message_handler, message_from_json, register_message_type,
    registered_message_types, unregister_message_type,
};
pub use registry::{
    Handler, TypeRegistry, get_handler, register_type, registered_types, unregister_type,
};
