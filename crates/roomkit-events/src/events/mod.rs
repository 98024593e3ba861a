//! Built-in event types.

mod call;
mod member;
mod message;
mod presence;
mod receipt;
mod redaction;
mod room_state;
mod tag;
mod third_party_invite;
mod typing;

pub use call::{
    CallAnswerContent, CallAnswerEvent, CallCandidatesContent, CallCandidatesEvent,
    CallHangupContent, CallHangupEvent, CallInviteContent, CallInviteEvent, Candidate,
    HangupReason, SdpType, SessionDescription,
};
pub use member::{MemberContent, Membership, RoomMemberEvent};
pub use message::{MessageLayer, RoomMessageEvent};
pub use presence::{Presence, PresenceContent, PresenceEvent};
pub use receipt::{Receipt, ReceiptContent, ReceiptEvent};
pub use redaction::{RedactionContent, RoomRedactionEvent};
pub use room_state::{
    AvatarContent, CanonicalAliasContent, CreateContent, GuestAccess, GuestAccessContent,
    HistoryVisibility, HistoryVisibilityContent, JoinRule, JoinRulesContent, NameContent,
    RoomAvatarEvent, RoomCanonicalAliasEvent, RoomCreateEvent, RoomGuestAccessEvent,
    RoomHistoryVisibilityEvent, RoomJoinRulesEvent, RoomNameEvent, RoomTopicEvent, TopicContent,
};
pub use tag::{RoomTag, TagContent, TagEvent};
pub use third_party_invite::{
    InvitePublicKey, RoomThirdPartyInviteEvent, ThirdPartyInviteContent,
};
pub use typing::TypingEvent;

use crate::event::Event;
use crate::registry::Handler;

/// Every built-in type with its default tag.
pub(crate) fn builtin_handlers() -> Vec<(&'static str, Handler<dyn Event>)> {
    vec![
        (PresenceEvent::TYPE, Handler::event::<PresenceEvent>()),
        (ReceiptEvent::TYPE, Handler::event::<ReceiptEvent>()),
        (TypingEvent::TYPE, Handler::event::<TypingEvent>()),
        (TagEvent::TYPE, Handler::event::<TagEvent>()),
        (RoomMessageEvent::TYPE, Handler::event::<RoomMessageEvent>()),
        (RoomRedactionEvent::TYPE, Handler::event::<RoomRedactionEvent>()),
        (RoomMemberEvent::TYPE, Handler::event::<RoomMemberEvent>()),
        (RoomNameEvent::TYPE, Handler::event::<RoomNameEvent>()),
        (RoomTopicEvent::TYPE, Handler::event::<RoomTopicEvent>()),
        (RoomAvatarEvent::TYPE, Handler::event::<RoomAvatarEvent>()),
        (
            RoomCanonicalAliasEvent::TYPE,
            Handler::event::<RoomCanonicalAliasEvent>(),
        ),
        (RoomCreateEvent::TYPE, Handler::event::<RoomCreateEvent>()),
        (RoomJoinRulesEvent::TYPE, Handler::event::<RoomJoinRulesEvent>()),
        (
            RoomHistoryVisibilityEvent::TYPE,
            Handler::event::<RoomHistoryVisibilityEvent>(),
        ),
        (
            RoomGuestAccessEvent::TYPE,
            Handler::event::<RoomGuestAccessEvent>(),
        ),
        (
            RoomThirdPartyInviteEvent::TYPE,
            Handler::event::<RoomThirdPartyInviteEvent>(),
        ),
        (CallInviteEvent::TYPE, Handler::event::<CallInviteEvent>()),
        (CallAnswerEvent::TYPE, Handler::event::<CallAnswerEvent>()),
        (CallHangupEvent::TYPE, Handler::event::<CallHangupEvent>()),
        (CallCandidatesEvent::TYPE, Handler::event::<CallCandidatesEvent>()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_constructs_its_own_tag() {
        let handlers = builtin_handlers();
        assert_eq!(handlers.len(), 20);
        for (tag, handler) in handlers {
            let event = handler.construct(tag);
            assert_eq!(event.event_type(), Some(tag));
        }
    }
}
