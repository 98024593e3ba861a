//! Envelope keys shared by every event sent in a room.

use roomkit_core::{IdKind, Result};

use crate::event::Layer;
use crate::json::{self, Object};

/// Owns `event_id`, `room_id`, `sender` and the `unsigned` block.
///
/// None of these is mandatory: unset keys are left out, and `unsigned` is
/// left out entirely when all three of its members are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomLayer {
    event_id: Option<String>,
    room_id: Option<String>,
    sender: Option<String>,
    age: Option<u64>,
    redacted_because: Option<String>,
    transaction_id: Option<String>,
}

impl RoomLayer {
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn set_event_id(&mut self, event_id: impl Into<String>) -> Result<()> {
        let event_id = event_id.into();
        IdKind::Event.validate(&event_id)?;
        self.event_id = Some(event_id);
        Ok(())
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn set_room_id(&mut self, room_id: impl Into<String>) -> Result<()> {
        let room_id = room_id.into();
        IdKind::Room.validate(&room_id)?;
        self.room_id = Some(room_id);
        Ok(())
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) -> Result<()> {
        let sender = sender.into();
        IdKind::User.validate(&sender)?;
        self.sender = Some(sender);
        Ok(())
    }

    /// Milliseconds since the event was sent, as reported by the server.
    pub fn age(&self) -> Option<u64> {
        self.age
    }

    pub fn set_age(&mut self, age: Option<u64>) {
        self.age = age;
    }

    pub fn redacted_because(&self) -> Option<&str> {
        self.redacted_because.as_deref()
    }

    pub fn set_redacted_because(&mut self, reason: Option<String>) {
        self.redacted_because = reason;
    }

    pub fn is_redacted(&self) -> bool {
        self.redacted_because.is_some()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn set_transaction_id(&mut self, transaction_id: Option<String>) {
        self.transaction_id = transaction_id;
    }
}

impl Layer for RoomLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(event_id) = json::get_string(json, "event_id")? {
            self.event_id = Some(event_id);
        }
        if let Some(room_id) = json::get_string(json, "room_id")? {
            self.room_id = Some(room_id);
        }
        if let Some(sender) = json::get_string(json, "sender")? {
            self.sender = Some(sender);
        }
        if let Some(unsigned) = json::get_object(json, "unsigned")? {
            if let Some(age) = json::get_u64(unsigned, "age")? {
                self.age = Some(age);
            }
            if let Some(reason) = json::get_string(unsigned, "redacted_because")? {
                self.redacted_because = Some(reason);
            }
            if let Some(txn) = json::get_string(unsigned, "transaction_id")? {
                self.transaction_id = Some(txn);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json, "event_id", self.event_id.as_deref());
        json::put_opt(json, "room_id", self.room_id.as_deref());
        json::put_opt(json, "sender", self.sender.as_deref());

        if self.age.is_some() || self.redacted_because.is_some() || self.transaction_id.is_some()
        {
            let unsigned = json::child_mut(json, "unsigned")?;
            json::put_opt(unsigned, "age", self.age);
            json::put_opt(unsigned, "redacted_because", self.redacted_because.as_deref());
            json::put_opt(unsigned, "transaction_id", self.transaction_id.as_deref());
        }
        Ok(())
    }
}
