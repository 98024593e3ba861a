//! Room state events keyed by the empty state key.

use roomkit_core::{Result, wire_enum};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::{RoomLayer, StateLayer};

wire_enum! {
    /// Who may join a room.
    pub enum JoinRule: "join rule" {
        Public => "public",
        Knock => "knock",
        Invite => "invite",
        Private => "private",
    }
}

wire_enum! {
    /// Who may read a room's history.
    pub enum HistoryVisibility: "history visibility" {
        Invited => "invited",
        Joined => "joined",
        Shared => "shared",
        WorldReadable => "world_readable",
    }
}

wire_enum! {
    pub enum GuestAccess: "guest access" {
        CanJoin => "can_join",
        Forbidden => "forbidden",
    }
}

/// Declares a state event whose content layer is `$content` and whose state
/// key is always empty.
macro_rules! room_state_event {
    ($(#[$meta:meta])* $name:ident, $content:ty, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            base: EventBase,
            pub content: $content,
            pub state: StateLayer,
            pub room: RoomLayer,
        }

        impl $name {
            pub const TYPE: &'static str = $tag;
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    base: EventBase::new(Self::TYPE),
                    content: <$content>::default(),
                    state: StateLayer::empty_key(),
                    room: RoomLayer::default(),
                }
            }
        }

        impl_event!($name => [content, state, room]);
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameContent {
    pub name: Option<String>,
}

impl Layer for NameContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(name) = json::get_string(content, "name")? {
                self.name = Some(name);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json::content_mut(json)?, "name", self.name.as_deref());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicContent {
    pub topic: Option<String>,
}

impl Layer for TopicContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(topic) = json::get_string(content, "topic")? {
                self.topic = Some(topic);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json::content_mut(json)?, "topic", self.topic.as_deref());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvatarContent {
    pub url: Option<String>,
    pub info: Option<Object>,
}

impl Layer for AvatarContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(url) = json::get_string(content, "url")? {
            self.url = Some(url);
        }
        if let Some(info) = json::get_object(content, "info")? {
            self.info = Some(info.clone());
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        json::put_required(content, "url", self.url.as_deref(), "avatar url")?;
        json::put_opt(content, "info", self.info.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalAliasContent {
    pub alias: Option<String>,
}

impl Layer for CanonicalAliasContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(alias) = json::get_string(content, "alias")? {
                self.alias = Some(alias);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json::content_mut(json)?, "alias", self.alias.as_deref());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContent {
    pub creator: Option<String>,
    /// Whether users on other servers may join. Absent means yes.
    pub federate: Option<bool>,
}

impl CreateContent {
    pub fn is_federated(&self) -> bool {
        self.federate.unwrap_or(true)
    }
}

impl Layer for CreateContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(creator) = json::get_string(content, "creator")? {
            self.creator = Some(creator);
        }
        if let Some(federate) = json::get_bool(content, "m.federate")? {
            self.federate = Some(federate);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        json::put_required(content, "creator", self.creator.as_deref(), "creator")?;
        json::put_opt(content, "m.federate", self.federate);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinRulesContent {
    pub join_rule: Option<JoinRule>,
}

impl Layer for JoinRulesContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(join_rule) = json::get_enum(content, "join_rule")? {
                self.join_rule = Some(join_rule);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_enum(json::content_mut(json)?, "join_rule", self.join_rule, "join rule")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryVisibilityContent {
    pub history_visibility: Option<HistoryVisibility>,
}

impl Layer for HistoryVisibilityContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(visibility) = json::get_enum(content, "history_visibility")? {
                self.history_visibility = Some(visibility);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_enum(
            json::content_mut(json)?,
            "history_visibility",
            self.history_visibility,
            "history visibility",
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestAccessContent {
    pub guest_access: Option<GuestAccess>,
}

impl Layer for GuestAccessContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(guest_access) = json::get_enum(content, "guest_access")? {
                self.guest_access = Some(guest_access);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_enum(
            json::content_mut(json)?,
            "guest_access",
            self.guest_access,
            "guest access",
        )
    }
}

room_state_event!(
    /// The room's display name.
    RoomNameEvent,
    NameContent,
    "m.room.name"
);
room_state_event!(RoomTopicEvent, TopicContent, "m.room.topic");
room_state_event!(RoomAvatarEvent, AvatarContent, "m.room.avatar");
room_state_event!(
    RoomCanonicalAliasEvent,
    CanonicalAliasContent,
    "m.room.canonical_alias"
);
room_state_event!(
    /// The first event of every room.
    RoomCreateEvent,
    CreateContent,
    "m.room.create"
);
room_state_event!(RoomJoinRulesEvent, JoinRulesContent, "m.room.join_rules");
room_state_event!(
    RoomHistoryVisibilityEvent,
    HistoryVisibilityContent,
    "m.room.history_visibility"
);
room_state_event!(
    RoomGuestAccessEvent,
    GuestAccessContent,
    "m.room.guest_access"
);
