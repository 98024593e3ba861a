//! `m.room.third_party_invite`: an invite sent to an email address or other
//! third-party identifier, keyed by its token.

use roomkit_core::{Error, Result};
use serde_json::Value;

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::{RoomLayer, StateLayer};

/// An additional key the invite may be signed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitePublicKey {
    pub public_key: String,
    pub key_validity_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThirdPartyInviteContent {
    /// A user-readable rendering of the invitee, e.g. a masked email.
    pub display_name: Option<String>,
    pub key_validity_url: Option<String>,
    pub public_key: Option<String>,
    pub public_keys: Vec<InvitePublicKey>,
}

impl ThirdPartyInviteContent {
    fn read_public_keys(items: &[Value]) -> Result<Vec<InvitePublicKey>> {
        items
            .iter()
            .map(|item| -> Result<InvitePublicKey> {
                let entry = item
                    .as_object()
                    .ok_or_else(|| Error::invalid_format("public_keys entries must be objects"))?;
                let public_key = json::get_string(entry, "public_key")?
                    .ok_or_else(|| Error::incomplete("public_keys entry has no public_key"))?;
                Ok(InvitePublicKey {
                    public_key,
                    key_validity_url: json::get_string(entry, "key_validity_url")?,
                })
            })
            .collect()
    }
}

impl Layer for ThirdPartyInviteContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(display_name) = json::get_string(content, "display_name")? {
            self.display_name = Some(display_name);
        }
        if let Some(url) = json::get_string(content, "key_validity_url")? {
            self.key_validity_url = Some(url);
        }
        if let Some(public_key) = json::get_string(content, "public_key")? {
            self.public_key = Some(public_key);
        }
        if let Some(items) = json::get_array(content, "public_keys")? {
            self.public_keys = Self::read_public_keys(items)?;
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        json::put_required(
            content,
            "display_name",
            self.display_name.as_deref(),
            "display_name",
        )?;
        json::put_required(
            content,
            "key_validity_url",
            self.key_validity_url.as_deref(),
            "key_validity_url",
        )?;
        json::put_required(content, "public_key", self.public_key.as_deref(), "public_key")?;
        if !self.public_keys.is_empty() {
            let keys: Vec<Value> = self
                .public_keys
                .iter()
                .map(|key| {
                    let mut entry = Object::new();
                    json::put(&mut entry, "public_key", key.public_key.as_str());
                    json::put_opt(&mut entry, "key_validity_url", key.key_validity_url.as_deref());
                    Value::Object(entry)
                })
                .collect();
            json::put(content, "public_keys", keys);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomThirdPartyInviteEvent {
    base: EventBase,
    pub content: ThirdPartyInviteContent,
    pub state: StateLayer,
    pub room: RoomLayer,
}

impl RoomThirdPartyInviteEvent {
    pub const TYPE: &'static str = "m.room.third_party_invite";

    /// The invite token, carried as the state key.
    pub fn token(&self) -> Option<&str> {
        self.state.state_key()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.state.set_state_key(token);
    }
}

impl Default for RoomThirdPartyInviteEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: ThirdPartyInviteContent::default(),
            state: StateLayer::default(),
            room: RoomLayer::default(),
        }
    }
}

impl_event!(RoomThirdPartyInviteEvent => [content, state, room]);
