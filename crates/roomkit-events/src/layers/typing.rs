//! Keys of the typing notification.

use roomkit_core::{IdKind, Result};

use crate::event::Layer;
use crate::json::{self, Object};

/// Owns `room_id` (mandatory) and `content.user_ids`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingLayer {
    room_id: Option<String>,
    user_ids: Vec<String>,
}

impl TypingLayer {
    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn set_room_id(&mut self, room_id: impl Into<String>) -> Result<()> {
        let room_id = room_id.into();
        IdKind::Room.validate(&room_id)?;
        self.room_id = Some(room_id);
        Ok(())
    }

    /// Users currently typing.
    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }

    pub fn set_user_ids(&mut self, user_ids: Vec<String>) {
        self.user_ids = user_ids;
    }
}

impl Layer for TypingLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(room_id) = json::get_string(json, "room_id")? {
            self.room_id = Some(room_id);
        }
        if let Some(content) = json::content(json)? {
            if let Some(user_ids) = json::get_string_list(content, "user_ids")? {
                self.user_ids = user_ids;
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "room_id", self.room_id.as_deref(), "room_id")?;
        json::put(json::content_mut(json)?, "user_ids", self.user_ids.clone());
        Ok(())
    }
}
