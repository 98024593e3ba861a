//! The outermost layer: the event's type tag.

use roomkit_core::{Error, Result};

use crate::event::Layer;
use crate::json::{self, Object};

/// Owns the `type` key.
///
/// The tag can be set once. Later attempts to change it, directly or by
/// populating from a document with a different `type`, fail with
/// `InvalidType`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBase {
    event_type: Option<String>,
}

impl EventBase {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
        }
    }

    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }

    /// Sets the tag if unset. Setting the current value again is a no-op.
    pub fn set_event_type(&mut self, event_type: &str) -> Result<()> {
        if event_type.is_empty() {
            return Err(Error::invalid_type("event type must not be empty"));
        }
        match self.event_type.as_deref() {
            Some(current) if current != event_type => Err(Error::invalid_type(format!(
                "event type is already {current:?}, cannot change it to {event_type:?}"
            ))),
            Some(_) => Ok(()),
            None => {
                self.event_type = Some(event_type.to_string());
                Ok(())
            }
        }
    }

    // Construction-time only: a registry handler stamps the tag it was
    // looked up under over the type's default.
    pub(crate) fn retag(&mut self, event_type: &str) {
        self.event_type = Some(event_type.to_string());
    }

    /// Validates a document's `type` against this tag without mutating.
    pub fn check_document(&self, json: &Object) -> Result<()> {
        let document_type = json::get_str(json, "type")?;
        match (self.event_type.as_deref(), document_type) {
            (Some(current), Some(found)) if current != found => Err(Error::invalid_type(format!(
                "document has type {found:?} but the event is {current:?}"
            ))),
            (None, None) => Err(Error::incomplete("event has no type")),
            _ => Ok(()),
        }
    }
}

impl Layer for EventBase {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(found) = json::get_str(json, "type")? {
            self.set_event_type(found)?;
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "type", self.event_type.as_deref(), "event type")
    }
}
