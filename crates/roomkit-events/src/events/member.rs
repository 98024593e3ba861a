//! `m.room.member`: a user's membership of a room.

use roomkit_core::{IdKind, Result, wire_enum};

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::{RoomLayer, StateLayer};

wire_enum! {
    pub enum Membership: "membership" {
        Invite => "invite",
        Join => "join",
        Knock => "knock",
        Leave => "leave",
        Ban => "ban",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberContent {
    pub membership: Option<Membership>,
    pub avatar_url: Option<String>,
    pub displayname: Option<String>,
    /// Set on invites to flag the room as a direct chat.
    pub is_direct: Option<bool>,
}

impl Layer for MemberContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(membership) = json::get_enum(content, "membership")? {
            self.membership = Some(membership);
        }
        if let Some(avatar_url) = json::get_string(content, "avatar_url")? {
            self.avatar_url = Some(avatar_url);
        }
        if let Some(displayname) = json::get_string(content, "displayname")? {
            self.displayname = Some(displayname);
        }
        if let Some(is_direct) = json::get_bool(content, "is_direct")? {
            self.is_direct = Some(is_direct);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        json::put_enum(content, "membership", self.membership, "membership")?;
        json::put_opt(content, "avatar_url", self.avatar_url.as_deref());
        json::put_opt(content, "displayname", self.displayname.as_deref());
        json::put_opt(content, "is_direct", self.is_direct);
        Ok(())
    }
}

/// Membership change of the user named by the state key.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomMemberEvent {
    base: EventBase,
    pub content: MemberContent,
    pub state: StateLayer,
    pub room: RoomLayer,
}

impl RoomMemberEvent {
    pub const TYPE: &'static str = "m.room.member";

    /// The user whose membership this is.
    pub fn user_id(&self) -> Option<&str> {
        self.state.state_key()
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) -> Result<()> {
        let user_id = user_id.into();
        IdKind::User.validate(&user_id)?;
        self.state.set_state_key(user_id);
        Ok(())
    }

    pub fn membership(&self) -> Option<Membership> {
        self.content.membership
    }
}

impl Default for RoomMemberEvent {
    fn default() -> Self {
        Self {
            base: EventBase::new(Self::TYPE),
            content: MemberContent::default(),
            state: StateLayer::default(),
            room: RoomLayer::default(),
        }
    }
}

impl_event!(RoomMemberEvent => [content, state, room]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use roomkit_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn join_example() {
        let mut event = RoomMemberEvent::default();
        event
            .populate_from_json(&json!({
                "type": "m.room.member",
                "state_key": "@alice:example.org",
                "content": {"membership": "join"}
            }))
            .unwrap();

        assert_eq!(event.membership(), Some(Membership::Join));
        assert_eq!(event.user_id(), Some("@alice:example.org"));
        insta::assert_json_snapshot!(event.to_json().unwrap(), @r###"
        {
          "content": {
            "membership": "join"
          },
          "state_key": "@alice:example.org",
          "type": "m.room.member"
        }
        "###);
    }

    #[test]
    fn full_roundtrip() {
        let document = json!({
            "type": "m.room.member",
            "event_id": "$m:example.org",
            "room_id": "!room:example.org",
            "sender": "@bob:example.org",
            "state_key": "@carol:example.org",
            "content": {
                "membership": "invite",
                "displayname": "Carol",
                "avatar_url": "mxc://example.org/carol",
                "is_direct": true
            }
        });
        let mut event = RoomMemberEvent::default();
        event.populate_from_json(&document).unwrap();
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn unknown_membership_fails_on_encode() {
        let mut event = RoomMemberEvent::default();
        event
            .populate_from_json(&json!({
                "type": "m.room.member",
                "state_key": "@alice:example.org",
                "content": {"membership": "lurk"}
            }))
            .unwrap();
        assert_eq!(event.membership(), Some(Membership::Unknown));
        assert_eq!(event.to_json().unwrap_err().kind(), ErrorKind::UnknownValue);
    }

    #[test]
    fn state_key_is_mandatory() {
        let mut event = RoomMemberEvent::default();
        event.content.membership = Some(Membership::Leave);
        assert_eq!(event.to_json().unwrap_err().kind(), ErrorKind::Incomplete);

        event.set_user_id("@alice:example.org").unwrap();
        assert!(event.to_json().is_ok());
    }

    #[test]
    fn set_user_id_validates() {
        let mut event = RoomMemberEvent::default();
        assert_eq!(
            event.set_user_id("alice").unwrap_err().kind(),
            ErrorKind::InvalidId
        );
        assert!(event.user_id().is_none());
    }

    #[test]
    fn type_mismatch_leaves_event_untouched() {
        let mut event = RoomMemberEvent::default();
        let err = event
            .populate_from_json(&json!({
                "type": "m.room.name",
                "state_key": "@alice:example.org",
                "content": {"membership": "join"}
            }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert_eq!(event, RoomMemberEvent::default());
    }
}
