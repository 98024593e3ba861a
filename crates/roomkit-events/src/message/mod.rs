//! Message contents: the `content` of an `m.room.message` event.
//!
//! Message sub-types are resolved by `msgtype` through their own
//! [`TypeRegistry`], independent of the event registry. They evolve out of
//! band from event types, so a `msgtype` with no handler is not an error: the
//! room message keeps the raw content instead (see
//! [`RoomMessageEvent`](crate::events::RoomMessageEvent)).
//!
//! A message content is a layer stack over the `content` object, ending with
//! [`MessageBase`] which owns `msgtype` and `body`.

mod location;
mod media;
mod text;

use std::any::Any;
use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};

use roomkit_core::{Error, Result};
use serde_json::Value;

use crate::event::Layer;
use crate::json::{self, Object};
use crate::registry::{Handler, TypeRegistry};

pub use location::{GeoLayer, LocationMessage};
pub use media::{FileMessage, FileNameLayer, ImageMessage, MediaLayer};
pub use text::{EmoteMessage, FormattedLayer, NoticeMessage, TextMessage};

/// Owns `msgtype` and `body`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBase {
    msgtype: Option<String>,
    body: Option<String>,
}

impl MessageBase {
    pub fn new(msgtype: impl Into<String>) -> Self {
        Self {
            msgtype: Some(msgtype.into()),
            body: None,
        }
    }

    pub fn msgtype(&self) -> Option<&str> {
        self.msgtype.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    pub(crate) fn retag(&mut self, msgtype: &str) {
        self.msgtype = Some(msgtype.to_string());
    }

    /// Validates a content object's `msgtype` against this one.
    pub fn check_document(&self, content: &Object) -> Result<()> {
        let found = json::get_str(content, "msgtype")?;
        match (self.msgtype.as_deref(), found) {
            (Some(current), Some(found)) if current != found => Err(Error::invalid_type(format!(
                "content has msgtype {found:?} but the message is {current:?}"
            ))),
            (None, None) => Err(Error::incomplete("message has no msgtype")),
            _ => Ok(()),
        }
    }
}

impl Layer for MessageBase {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(msgtype) = json::get_string(json, "msgtype")? {
            self.msgtype = Some(msgtype);
        }
        if let Some(body) = json::get_string(json, "body")? {
            self.body = Some(body);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "body", self.body.as_deref(), "message body")?;
        json::put_required(json, "msgtype", self.msgtype.as_deref(), "msgtype")
    }
}

/// A decodable, encodable message content.
///
/// Same protocol as [`Event`](crate::Event), applied to the `content` object.
pub trait MessageContent: fmt::Debug + Send + Sync + Any {
    fn base(&self) -> &MessageBase;

    fn base_mut(&mut self) -> &mut MessageBase;

    /// Layers other than the base, most specific first.
    fn layers(&self) -> Vec<&dyn Layer>;

    fn layers_mut(&mut self) -> Vec<&mut dyn Layer>;

    fn as_any(&self) -> &dyn Any;

    fn clone_content(&self) -> Box<dyn MessageContent>;

    fn msgtype(&self) -> Option<&str> {
        self.base().msgtype()
    }

    fn body(&self) -> Option<&str> {
        self.base().body()
    }

    fn populate_from_json(&mut self, content: &Object) -> Result<()> {
        self.base().check_document(content)?;
        for layer in self.layers_mut() {
            layer.populate(content)?;
        }
        self.base_mut().populate(content)
    }

    /// Writes this content into `content`. Discard `content` on error.
    fn serialize_to_json(&self, content: &mut Object) -> Result<()> {
        for layer in self.layers() {
            layer.serialize(content)?;
        }
        self.base().serialize(content)
    }

    fn to_json(&self) -> Result<Value> {
        let mut content = Object::new();
        self.serialize_to_json(&mut content)?;
        Ok(Value::Object(content))
    }
}

impl dyn MessageContent {
    pub fn downcast_ref<M: MessageContent>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }
}

impl Clone for Box<dyn MessageContent> {
    fn clone(&self) -> Self {
        self.clone_content()
    }
}

fn construct_message<M: MessageContent + Default>(msgtype: &str) -> Box<dyn MessageContent> {
    let mut message = M::default();
    message.base_mut().retag(msgtype);
    Box::new(message)
}

impl Handler<dyn MessageContent> {
    /// A handler constructing `M`.
    pub fn message<M: MessageContent + Default>() -> Self {
        Handler::new(std::any::type_name::<M>(), construct_message::<M>)
    }
}

impl TypeRegistry<dyn MessageContent> {
    /// A message registry holding every built-in msgtype.
    pub fn with_builtin_messages() -> Self {
        let mut registry = Self::new("message");
        let builtins = [
            (TextMessage::MSGTYPE, Handler::message::<TextMessage>()),
            (EmoteMessage::MSGTYPE, Handler::message::<EmoteMessage>()),
            (NoticeMessage::MSGTYPE, Handler::message::<NoticeMessage>()),
            (ImageMessage::MSGTYPE, Handler::message::<ImageMessage>()),
            (FileMessage::MSGTYPE, Handler::message::<FileMessage>()),
            (LocationMessage::MSGTYPE, Handler::message::<LocationMessage>()),
        ];
        for (msgtype, handler) in builtins {
            registry.seed(msgtype, handler);
        }
        registry
    }

    /// Builds a message content from a `content` object.
    ///
    /// Returns `Ok(None)` when the content has no `msgtype` or no handler is
    /// registered for it; callers keep the raw object in that case.
    pub fn new_from_json(&self, content: &Object) -> Result<Option<Box<dyn MessageContent>>> {
        let Some(msgtype) = json::get_str(content, "msgtype")? else {
            return Ok(None);
        };
        let Some(handler) = self.lookup(msgtype) else {
            return Ok(None);
        };
        let mut message = handler.construct(msgtype);
        message.populate_from_json(content)?;
        Ok(Some(message))
    }
}

static MESSAGE_TYPES: LazyLock<RwLock<TypeRegistry<dyn MessageContent>>> =
    LazyLock::new(|| RwLock::new(TypeRegistry::with_builtin_messages()));

/// Registers `handler` for `msgtype` in the process-wide message registry.
pub fn register_message_type(msgtype: &str, handler: Handler<dyn MessageContent>) -> Result<()> {
    MESSAGE_TYPES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(msgtype, handler)
}

pub fn unregister_message_type(msgtype: &str) -> Option<Handler<dyn MessageContent>> {
    MESSAGE_TYPES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .unregister(msgtype)
}

pub fn get_message_handler(msgtype: &str) -> Option<Handler<dyn MessageContent>> {
    MESSAGE_TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(msgtype)
}

pub fn registered_message_types() -> Vec<String> {
    MESSAGE_TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .tags()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Decodes `content` through the process-wide message registry.
pub fn message_from_json(content: &Object) -> Result<Option<Box<dyn MessageContent>>> {
    MESSAGE_TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .new_from_json(content)
}

/// Implements [`MessageContent`] for a `Clone` struct with a
/// `base: MessageBase` field and the named layer fields.
macro_rules! impl_message {
    ($ty:ty => [$($layer:ident),* $(,)?]) => {
        impl $crate::message::MessageContent for $ty {
            fn base(&self) -> &$crate::message::MessageBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::message::MessageBase {
                &mut self.base
            }

            fn layers(&self) -> Vec<&dyn $crate::event::Layer> {
                vec![$(&self.$layer as &dyn $crate::event::Layer),*]
            }

            fn layers_mut(&mut self) -> Vec<&mut dyn $crate::event::Layer> {
                vec![$(&mut self.$layer as &mut dyn $crate::event::Layer),*]
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn clone_content(&self) -> Box<dyn $crate::message::MessageContent> {
                Box::new(self.clone())
            }
        }
    };
}

pub(crate) use impl_message;
