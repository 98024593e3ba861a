//! `m.presence`: a user's online status.

use roomkit_core::{Result, wire_enum};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};

wire_enum! {
    /// A user's advertised availability.
    pub enum Presence: "presence" {
        Online => "online",
        Offline => "offline",
        Unavailable => "unavailable",
        FreeForChat => "free_for_chat",
        Hidden => "hidden",
    }
}

/// Owns the envelope `event_id` and the whole `content` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceContent {
    pub event_id: Option<String>,
    pub user_id: Option<String>,
    pub displayname: Option<String>,
    pub avatar_url: Option<String>,
    /// Milliseconds since the user last did something.
    pub last_active_ago: Option<u64>,
    pub currently_active: Option<bool>,
    pub presence: Option<Presence>,
}

impl Layer for PresenceContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(event_id) = json::get_string(json, "event_id")? {
            self.event_id = Some(event_id);
        }
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(user_id) = json::get_string(content, "user_id")? {
            self.user_id = Some(user_id);
        }
        if let Some(displayname) = json::get_string(content, "displayname")? {
            self.displayname = Some(displayname);
        }
        if let Some(avatar_url) = json::get_string(content, "avatar_url")? {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(ago) = json::get_u64(content, "last_active_ago")? {
            self.last_active_ago = Some(ago);
        }
        if let Some(active) = json::get_bool(content, "currently_active")? {
            self.currently_active = Some(active);
        }
        if let Some(presence) = json::get_enum(content, "presence")? {
            self.presence = Some(presence);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json, "event_id", self.event_id.as_deref());
        let content = json::content_mut(json)?;
        json::put_enum(content, "presence", self.presence, "presence")?;
        json::put_opt(content, "user_id", self.user_id.as_deref());
        json::put_opt(content, "displayname", self.displayname.as_deref());
        json::put_opt(content, "avatar_url", self.avatar_url.as_deref());
        json::put_opt(content, "last_active_ago", self.last_active_ago);
        json::put_opt(content, "currently_active", self.currently_active);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresenceEvent {
    base: EventBase,
    pub content: PresenceContent,
}

impl PresenceEvent {
    pub const TYPE: &'static str = "m.presence";
}

impl Default for PresenceEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: PresenceContent::default(),
        }
    }
}

impl_event!(PresenceEvent => [content]);
