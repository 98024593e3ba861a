//! VoIP signalling: `m.call.invite`, `m.call.answer`, `m.call.hangup` and
//! `m.call.candidates`.
//!
//! Every call event carries a [`CallLayer`] (`call_id`, `version`) on top of
//! the room envelope.

use roomkit_core::{Error, Result, WireEnum, wire_enum};
use serde_json::Value;

use crate::event::{EventBase, Layer, impl_event};
use crate::json::{self, Object};
use crate::layers::{CallLayer, RoomLayer};

wire_enum! {
    pub enum SdpType: "session description type" {
        Offer => "offer",
        Answer => "answer",
    }
}

wire_enum! {
    pub enum HangupReason: "hangup reason" {
        IceFailed => "ice_failed",
        InviteTimeout => "invite_timeout",
        UserHangup => "user_hangup",
    }
}

/// A WebRTC session description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDescription {
    pub sdp_type: Option<SdpType>,
    pub sdp: Option<String>,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: Some(SdpType::Offer),
            sdp: Some(sdp.into()),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: Some(SdpType::Answer),
            sdp: Some(sdp.into()),
        }
    }

    fn read(object: &Object) -> Result<Self> {
        Ok(Self {
            sdp_type: json::get_enum(object, "type")?,
            sdp: json::get_string(object, "sdp")?,
        })
    }

    fn write(&self) -> Result<Value> {
        let mut object = Object::new();
        json::put_enum(&mut object, "type", self.sdp_type, "session description type")?;
        json::put_required(&mut object, "sdp", self.sdp.as_deref(), "sdp")?;
        Ok(Value::Object(object))
    }
}

macro_rules! call_event {
    ($(#[$meta:meta])* $name:ident, $content:ty, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            base: EventBase,
            pub content: $content,
            pub call: CallLayer,
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
                    call: CallLayer::default(),
                    room: RoomLayer::default(),
                }
            }
        }

        impl_event!($name => [content, call, room]);
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallInviteContent {
    pub offer: Option<SessionDescription>,
    /// Milliseconds the invite stays valid after it is sent.
    pub lifetime: Option<u64>,
}

impl Layer for CallInviteContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(offer) = json::get_object(content, "offer")? {
            self.offer = Some(SessionDescription::read(offer)?);
        }
        if let Some(lifetime) = json::get_u64(content, "lifetime")? {
            self.lifetime = Some(lifetime);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let offer = self
            .offer
            .as_ref()
            .ok_or_else(|| Error::incomplete("call offer is not set"))?
            .write()?;
        let content = json::content_mut(json)?;
        json::put(content, "offer", offer);
        json::put_opt(content, "lifetime", self.lifetime);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallAnswerContent {
    pub answer: Option<SessionDescription>,
}

impl Layer for CallAnswerContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(answer) = json::get_object(content, "answer")? {
                self.answer = Some(SessionDescription::read(answer)?);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let answer = self
            .answer
            .as_ref()
            .ok_or_else(|| Error::incomplete("call answer is not set"))?
            .write()?;
        json::put(json::content_mut(json)?, "answer", answer);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallHangupContent {
    pub reason: Option<HangupReason>,
}

impl Layer for CallHangupContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(content) = json::content(json)? {
            if let Some(reason) = json::get_enum(content, "reason")? {
                self.reason = Some(reason);
            }
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        if let Some(reason) = self.reason {
            json::put(content, "reason", reason.to_wire()?);
        }
        Ok(())
    }
}

/// One ICE candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u64>,
    pub candidate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCandidatesContent {
    pub candidates: Vec<Candidate>,
}

impl Layer for CallCandidatesContent {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(items) = json::content(json)?
            .map(|content| json::get_array(content, "candidates"))
            .transpose()?
            .flatten()
        else {
            return Ok(());
        };
        self.candidates = items
            .iter()
            .map(|item| -> Result<Candidate> {
                let entry = item
                    .as_object()
                    .ok_or_else(|| Error::invalid_format("candidates must be objects"))?;
                Ok(Candidate {
                    sdp_mid: json::get_string(entry, "sdpMid")?,
                    sdp_m_line_index: json::get_u64(entry, "sdpMLineIndex")?,
                    candidate: json::get_string(entry, "candidate")?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let mut candidates = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            let mut entry = Object::new();
            json::put_opt(&mut entry, "sdpMid", candidate.sdp_mid.as_deref());
            json::put_opt(&mut entry, "sdpMLineIndex", candidate.sdp_m_line_index);
            json::put_required(
                &mut entry,
                "candidate",
                candidate.candidate.as_deref(),
                "ICE candidate",
            )?;
            candidates.push(Value::Object(entry));
        }
        json::put(json::content_mut(json)?, "candidates", candidates);
        Ok(())
    }
}

call_event!(
    /// Starts a call by offering a session description.
    CallInviteEvent,
    CallInviteContent,
    "m.call.invite"
);
call_event!(CallAnswerEvent, CallAnswerContent, "m.call.answer");
call_event!(CallHangupEvent, CallHangupContent, "m.call.hangup");
call_event!(
    /// ICE candidates trickled after the invite or answer.
    CallCandidatesEvent,
    CallCandidatesContent,
    "m.call.candidates"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;
    use roomkit_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn invite_roundtrip() {
        let document = json!({
            "type": "m.call.invite",
            "event_id": "$c:example.org",
            "room_id": "!room:example.org",
            "sender": "@alice:example.org",
            "content": {
                "call_id": "12345",
                "version": 0,
                "lifetime": 60000,
                "offer": {"type": "offer", "sdp": "v=0\r\no=- 6584580628695956864 2 IN IP4 127.0.0.1"}
            }
        });
        let mut event = CallInviteEvent::default();
        event.populate_from_json(&document).unwrap();
        assert_eq!(event.call.call_id(), Some("12345"));
        assert_eq!(
            event.content.offer.as_ref().unwrap().sdp_type,
            Some(SdpType::Offer)
        );
        assert_eq!(event.to_json().unwrap(), document);
    }

    #[test]
    fn missing_call_id_fails() {
        let mut event = CallAnswerEvent::default();
        event.content.answer = Some(SessionDescription::answer("v=0"));
        event.call.set_version(0);
        assert_eq!(event.to_json().unwrap_err().kind(), ErrorKind::Incomplete);

        event.call.set_call_id("c1");
        insta::assert_json_snapshot!(event.to_json().unwrap(), @r###"
        {
          "content": {
            "answer": {
              "sdp": "v=0",
              "type": "answer"
            },
            "call_id": "c1",
            "version": 0
          },
          "type": "m.call.answer"
        }
        "###);
    }

    #[test]
    fn unknown_sdp_type_fails_on_encode() {
        let mut event = CallInviteEvent::default();
        event
            .populate_from_json(&json!({
                "type": "m.call.invite",
                "content": {
                    "call_id": "c1",
                    "version": 0,
                    "offer": {"type": "pranswer", "sdp": "v=0"}
                }
            }))
            .unwrap();
        assert_eq!(
            event.content.offer.as_ref().unwrap().sdp_type,
            Some(SdpType::Unknown)
        );
        assert_eq!(event.to_json().unwrap_err().kind(), ErrorKind::UnknownValue);
    }

    #[test]
    fn hangup_reason_is_optional() {
        let mut event = CallHangupEvent::default();
        event.call = CallLayer::new("c1", 0);
        assert_eq!(
            event.to_json().unwrap(),
            json!({"type": "m.call.hangup", "content": {"call_id": "c1", "version": 0}})
        );

        event.content.reason = Some(HangupReason::InviteTimeout);
        let value = event.to_json().unwrap();
        assert_eq!(value["content"]["reason"], "invite_timeout");
    }

    #[test]
    fn candidates_roundtrip() {
        let document = json!({
            "type": "m.call.candidates",
            "content": {
                "call_id": "c1",
                "version": 0,
                "candidates": [
                    {
                        "sdpMid": "audio",
                        "sdpMLineIndex": 0,
                        "candidate": "candidate:863018703 1 udp 2122260223 10.9.64.156 43670 typ host generation 0"
                    }
                ]
            }
        });
        let mut event = CallCandidatesEvent::default();
        event.populate_from_json(&document).unwrap();
        assert_eq!(event.content.candidates[0].sdp_mid.as_deref(), Some("audio"));
        assert_eq!(event.to_json().unwrap(), document);
    }
}
