//! `m.room.redaction`.

use roomkit_core::{IdKind, Result};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::RoomLayer;

/// Owns the envelope `redacts` key and `content.reason`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionContent {
    redacts: Option<String>,
    pub reason: Option<String>,
}

impl RedactionContent {
    /// The id of the event being redacted.
    pub fn redacts(&self) -> Option<&str> {
        self.redacts.as_deref()
    }

    pub fn set_redacts(&mut self, event_id: impl Into<String>) -> Result<()> {
        let event_id = event_id.into();
        IdKind::Event.validate(&event_id)?;
        self.redacts = Some(event_id);
        Ok(())
    }
}

impl Layer for RedactionContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(redacts) = json::get_string(json, "redacts")? {
            self.redacts = Some(redacts);
        }
        if let Some(content) = json::content(json)? {
            if let Some(reason) = json::get_string(content, "reason")? {
                self.reason = Some(reason);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "redacts", self.redacts.as_deref(), "redacts")?;
        let content = json::content_mut(json)?;
        json::put_opt(content, "reason", self.reason.as_deref());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomRedactionEvent {
    base: EventBase,
    pub content: RedactionContent,
    pub room: RoomLayer,
}

impl RoomRedactionEvent {
    pub const TYPE: &'static str = "m.room.redaction";
}

impl Default for RoomRedactionEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: RedactionContent::default(),
            room: RoomLayer::default(),
        }
    }
}

impl_event!(RoomRedactionEvent => [content, room]);
