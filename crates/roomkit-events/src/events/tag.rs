//! `m.tag`: a user's tags on a room, e.g. `m.favourite`.

use roomkit_core::{Error, Result};
use serde_json::{Number, Value};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};

#[derive(Debug, Clone, PartialEq)]
pub struct RoomTag {
    pub name: String,
    /// Position among rooms with the same tag, in `[0, 1]`. Kept as sent so
    /// `1` is written back as `1`, not `1.0`.
    pub order: Option<Number>,
}

impl RoomTag {
    pub const FAVOURITE: &'static str = "m.favourite";
    pub const LOW_PRIORITY: &'static str = "m.lowpriority";

    /// A tag with the given position; non-finite orders are dropped.
    pub fn new(name: impl Into<String>, order: Option<f64>) -> Self {
        Self {
            name: name.into(),
            order: order.and_then(Number::from_f64),
        }
    }

    pub fn order_value(&self) -> Option<f64> {
        self.order.as_ref().and_then(Number::as_f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagContent {
    pub room_id: Option<String>,
    pub tags: Vec<RoomTag>,
}

impl TagContent {
    pub fn get(&self, name: &str) -> Option<&RoomTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}

impl Layer for TagContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(room_id) = json::get_string(json, "room_id")? {
            self.room_id = Some(room_id);
        }
        let Some(tags) = json::content(json)?
            .map(|content| json::get_object(content, "tags"))
            .transpose()?
            .flatten()
        else {
            return Ok(());
        };
        self.tags = tags
            .iter()
            .map(|(name, value)| -> Result<RoomTag> {
                let entry = value
                    .as_object()
                    .ok_or_else(|| Error::invalid_format(format!("tag {name} must be an object")))?;
                Ok(RoomTag {
                    name: name.clone(),
                    order: json::get_number(entry, "order")?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json, "room_id", self.room_id.as_deref());
        let tags = json::child_mut(json::content_mut(json)?, "tags")?;
        for tag in &self.tags {
            let mut entry = Object::new();
            json::put_opt(&mut entry, "order", tag.order.clone());
            json::put(tags, &tag.name, Value::Object(entry));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagEvent {
    base: EventBase,
    pub content: TagContent,
}

impl TagEvent {
    pub const TYPE: &'static str = "m.tag";
}

impl Default for TagEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: TagContent::default(),
        }
    }
}

impl_event!(TagEvent => [content]);
