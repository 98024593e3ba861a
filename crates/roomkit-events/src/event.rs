//! The marshalling contract every event type implements.
//!
//! An event is a stack of [`Layer`]s. Each layer owns a disjoint set of JSON
//! keys and knows how to read them from, and write them to, the *same*
//! document. A concrete type lists its layers from most specific to most
//! general; the [`EventBase`] layer, which owns the `type` key, always comes
//! last.
//!
//! # Decoding
//!
//! [`Event::populate_from_json`] first validates the whole document (it must
//! be an object, and its `type` must agree with a preset tag) and only then
//! walks the layers. A document that fails validation leaves the event
//! untouched.
//!
//! # Encoding
//!
//! [`Event::serialize_to_json`] walks the layers in the same order and stops
//! at the first failure. Nothing is rolled back: on error the output object
//! holds whatever the earlier layers wrote and must be discarded.
//! [`Event::to_json`] does that for you.

use std::any::Any;
use std::fmt;

use roomkit_core::Result;
use serde_json::Value;

use crate::json::Object;
use crate::registry::Handler;

pub use crate::layers::base::EventBase;

/// One slice of populate/serialize logic owning a fixed group of keys.
pub trait Layer: fmt::Debug + Send + Sync {
    /// Reads this layer's keys from `json`.
    fn populate(&mut self, json: &Object) -> Result<()>;

    /// Writes this layer's keys into `json`, failing if a mandatory one is unset.
    fn serialize(&self, json: &mut Object) -> Result<()>;
}

/// A decodable, encodable event.
///
/// Implementations normally come from `impl_event!`, which derives the layer
/// chain from a field list.
pub trait Event: fmt::Debug + Send + Sync + Any {
    fn base(&self) -> &EventBase;

    fn base_mut(&mut self) -> &mut EventBase;

    /// Layers other than the base, most specific first.
    fn layers(&self) -> Vec<&dyn Layer>;

    /// Layers other than the base, most specific first.
    fn layers_mut(&mut self) -> Vec<&mut dyn Layer>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The event's type tag, if set.
    fn event_type(&self) -> Option<&str> {
        self.base().event_type()
    }

    /// Fills this event from a JSON document.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `json` is not an object or a key has the wrong type
    /// - `InvalidType` if the document's `type` disagrees with the preset tag
    /// - `Incomplete` if no tag is known at all
    fn populate_from_json(&mut self, json: &Value) -> Result<()> {
        let Some(object) = json.as_object() else {
            return Err(roomkit_core::Error::invalid_format(
                "event JSON must be an object",
            ));
        };
        self.base().check_document(object)?;
        for layer in self.layers_mut() {
            layer.populate(object)?;
        }
        self.base_mut().populate(object)
    }

    /// Writes this event into `json`, leaf layer first.
    ///
    /// On error `json` is partially written and must be discarded.
    fn serialize_to_json(&self, json: &mut Object) -> Result<()> {
        for layer in self.layers() {
            layer.serialize(json)?;
        }
        self.base().serialize(json)
    }

    /// Encodes this event as a fresh JSON object.
    fn to_json(&self) -> Result<Value> {
        let mut object = Object::new();
        self.serialize_to_json(&mut object)?;
        Ok(Value::Object(object))
    }

    /// Encodes this event as compact JSON text, returning it with its length
    /// in bytes.
    fn to_json_string(&self) -> Result<(String, usize)> {
        let text = serde_json::to_string(&self.to_json()?)?;
        let len = text.len();
        Ok((text, len))
    }
}

impl dyn Event {
    pub fn is<E: Event>(&self) -> bool {
        self.as_any().is::<E>()
    }

    pub fn downcast_ref<E: Event>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    pub fn downcast_mut<E: Event>(&mut self) -> Option<&mut E> {
        self.as_any_mut().downcast_mut::<E>()
    }
}

fn construct_event<E: Event + Default>(tag: &str) -> Box<dyn Event> {
    let mut event = E::default();
    event.base_mut().retag(tag);
    Box::new(event)
}

impl Handler<dyn Event> {
    /// A handler constructing `E`.
    pub fn event<E: Event + Default>() -> Self {
        Handler::new(std::any::type_name::<E>(), construct_event::<E>)
    }
}

/// Implements [`Event`] for a struct with a `base: EventBase` field and the
/// named layer fields, listed most specific first.
macro_rules! impl_event {
    ($ty:ty => [$($layer:ident),* $(,)?]) => {
        impl $crate::event::Event for $ty {
            fn base(&self) -> &$crate::event::EventBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::event::EventBase {
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

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

pub(crate) use impl_event;
