//! `m.receipt`: read markers for a room.
//!
//! The content is nested three deep:
//! `{event_id: {receipt_type: {user_id: {"ts": millis}}}}`. It is flattened
//! here into a list of [`Receipt`]s.

use chrono::{DateTime, Utc};
use roomkit_core::{Error, IdKind, Result};
use serde_json::{Value, json};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};

/// One user's receipt for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub event_id: String,
    /// Usually `m.read`.
    pub receipt_type: String,
    pub user_id: String,
    pub ts: Option<u64>,
}

impl Receipt {
    pub const READ: &'static str = "m.read";

    pub fn read(event_id: impl Into<String>, user_id: impl Into<String>, ts: u64) -> Self {
        Self {
            event_id: event_id.into(),
            receipt_type: Self::READ.to_string(),
            user_id: user_id.into(),
            ts: Some(ts),
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(i64::try_from(self.ts?).ok()?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptContent {
    room_id: Option<String>,
    pub receipts: Vec<Receipt>,
}

impl ReceiptContent {
    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn set_room_id(&mut self, room_id: impl Into<String>) -> Result<()> {
        let room_id = room_id.into();
        IdKind::Room.validate(&room_id)?;
        self.room_id = Some(room_id);
        Ok(())
    }

    /// Receipts left on `event_id`.
    pub fn for_event<'a>(&'a self, event_id: &'a str) -> impl Iterator<Item = &'a Receipt> {
        self.receipts.iter().filter(move |r| r.event_id == event_id)
    }
}

fn nested<'a>(value: &'a Value, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_format(format!("receipt {what} must be an object")))
}

impl Layer for ReceiptContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(room_id) = json::get_string(json, "room_id")? {
            self.room_id = Some(room_id);
        }
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        let mut receipts = Vec::new();
        for (event_id, by_type) in content {
            for (receipt_type, by_user) in nested(by_type, "type map")? {
                for (user_id, receipt) in nested(by_user, "user map")? {
                    receipts.push(Receipt {
                        event_id: event_id.clone(),
                        receipt_type: receipt_type.clone(),
                        user_id: user_id.clone(),
                        ts: json::get_u64(nested(receipt, "entry")?, "ts")?,
                    });
                }
            }
        }
        self.receipts = receipts;
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "room_id", self.room_id.as_deref(), "room_id")?;
        let content = json::content_mut(json)?;
        for receipt in &self.receipts {
            let by_type = json::child_mut(content, &receipt.event_id)?;
            let by_user = json::child_mut(by_type, &receipt.receipt_type)?;
            let entry = match receipt.ts {
                Some(ts) => json!({ "ts": ts }),
                None => json!({}),
            };
            json::put(by_user, &receipt.user_id, entry);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptEvent {
    base: EventBase,
    pub content: ReceiptContent,
}

impl ReceiptEvent {
    pub const TYPE: &'static str = "m.receipt";
}

impl Default for ReceiptEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: ReceiptContent::default(),
        }
    }
}

impl_event!(ReceiptEvent => [content]);
