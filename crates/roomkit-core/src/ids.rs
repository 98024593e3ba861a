//! Validation of sigil-prefixed identifiers.
//!
//! Only the shape is checked: sigil, localpart, and (where the grammar wants
//! one) a `:server` suffix. Decoding never validates; setters do.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[^:\s]+:\S+$").expect("Invalid user id regex"));

static ROOM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^![^:\s]+:\S+$").expect("Invalid room id regex"));

static ROOM_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[^:\s]+:\S+$").expect("Invalid room alias regex"));

// Event ids drop the server part from room version 3 on.
static EVENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\S+$").expect("Invalid event id regex"));

/// The kinds of identifier this module knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    User,
    Room,
    RoomAlias,
    Event,
}

impl IdKind {
    fn regex(&self) -> &'static Regex {
        match self {
            Self::User => &*USER_ID,
            Self::Room => &*ROOM_ID,
            Self::RoomAlias => &*ROOM_ALIAS,
            Self::Event => &*EVENT_ID,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::User => "user id",
            Self::Room => "room id",
            Self::RoomAlias => "room alias",
            Self::Event => "event id",
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        self.regex().is_match(id)
    }

    /// Fails with [`ErrorKind::InvalidId`](crate::ErrorKind::InvalidId) if
    /// `id` is not shaped like this kind of identifier.
    pub fn validate(&self, id: &str) -> Result<()> {
        if self.matches(id) {
            Ok(())
        } else {
            Err(Error::invalid_id(format!("{:?} is not a valid {}", id, self.name())))
        }
    }
}

/// Returns the server name of a `sigil localpart:server` identifier.
pub fn server_name(id: &str) -> Option<&str> {
    id.split_once(':').map(|(_, server)| server).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn user_ids() {
        assert!(IdKind::User.matches("@alice:example.org"));
        assert!(IdKind::User.matches("@bob:localhost:8448"));
        assert!(!IdKind::User.matches("alice:example.org"));
        assert!(!IdKind::User.matches("@alice"));
        assert!(!IdKind::User.matches("@al ice:example.org"));
    }

    #[test]
    fn room_ids_and_aliases() {
        assert!(IdKind::Room.matches("!abc123:example.org"));
        assert!(!IdKind::Room.matches("#room:example.org"));
        assert!(IdKind::RoomAlias.matches("#room:example.org"));
    }

    #[test]
    fn event_ids_without_server() {
        assert!(IdKind::Event.matches("$acR1l0raoZnm60CBwAVgqbZqoO/mYU81xysh1u7XcJk"));
        assert!(IdKind::Event.matches("$143273582443PhrSn:example.org"));
        assert!(!IdKind::Event.matches("143273582443PhrSn"));
    }

    #[test]
    fn validate_reports_invalid_id() {
        let err = IdKind::Room.validate("room").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidId);
        assert!(err.to_string().contains("room id"));
    }

    #[test]
    fn server_names() {
        assert_eq!(server_name("@alice:example.org"), Some("example.org"));
        assert_eq!(server_name("$opaque"), None);
    }
}
