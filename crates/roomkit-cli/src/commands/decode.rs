//! `roomkit decode`: run documents through the event factory and back.

use std::io::{self, Read, Write};
use std::path::Path;

use roomkit_events::Event;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientResult;

/// Options for a decode run.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions<'a> {
    /// Tag to decode as, overriding the document's `type`.
    pub event_type: Option<&'a str>,
    pub pretty: bool,
}

/// Reads `file` (stdin for `None` or `-`) and decodes it to stdout.
pub fn run(file: Option<&Path>, options: &DecodeOptions<'_>) -> ClientResult<()> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let stdout = io::stdout();
    decode_text(&text, options, &mut stdout.lock())
}

/// Decodes `text`, a single event object or an array of them, writing a
/// summary line followed by the re-encoded document for each.
pub fn decode_text(text: &str, options: &DecodeOptions<'_>, out: &mut impl Write) -> ClientResult<()> {
    let document: Value = serde_json::from_str(text)?;
    match document {
        Value::Array(items) => {
            debug!(count = items.len(), "decoding event array");
            for item in &items {
                decode_one(item, options, out)?;
            }
        }
        single => decode_one(&single, options, out)?,
    }
    Ok(())
}

fn decode_one(document: &Value, options: &DecodeOptions<'_>, out: &mut impl Write) -> ClientResult<()> {
    let event = roomkit_events::new_from_json(options.event_type, document)?;
    let encoded = event.to_json()?;
    writeln!(out, "{}", summary(event.as_ref(), &encoded))?;
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&encoded)?
    } else {
        serde_json::to_string(&encoded)?
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}

/// One line naming the event type, the Rust type it decoded to and its
/// envelope ids.
pub fn summary(event: &dyn Event, encoded: &Value) -> String {
    let mut line = format!("{} ({})", event.event_type().unwrap_or("?"), rust_type(event));
    for key in ["event_id", "room_id", "sender", "state_key"] {
        if let Some(value) = encoded.get(key).and_then(Value::as_str) {
            line.push_str(&format!(" {key}={value:?}"));
        }
    }
    line
}

fn rust_type(event: &dyn Event) -> &'static str {
    roomkit_events::get_handler(event.event_type().unwrap_or_default())
        .map(|handler| handler.type_name())
        .and_then(|name| name.rsplit("::").next())
        .unwrap_or("unregistered")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomkit_core::ErrorKind;

    use crate::error::ClientError;

    fn decode(text: &str, options: &DecodeOptions<'_>) -> ClientResult<String> {
        let mut out = Vec::new();
        decode_text(text, options, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn decodes_member_event() {
        let output = decode(
            r#"{"type":"m.room.member","state_key":"@alice:example.org","content":{"membership":"join"}}"#,
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(
            output,
            "m.room.member (RoomMemberEvent) state_key=\"@alice:example.org\"\n\
             {\"content\":{\"membership\":\"join\"},\"state_key\":\"@alice:example.org\",\"type\":\"m.room.member\"}\n"
        );
    }

    #[test]
    fn decodes_arrays_pretty() {
        let output = decode(
            r#"[
                {"type": "m.typing", "room_id": "!r:example.org", "content": {"user_ids": []}},
                {"type": "m.room.topic", "state_key": "", "content": {"topic": "t"}}
            ]"#,
            &DecodeOptions {
                event_type: None,
                pretty: true,
            },
        )
        .unwrap();
        assert!(output.starts_with("m.typing (TypingEvent) room_id=\"!r:example.org\"\n{\n"));
        assert!(output.contains("m.room.topic (RoomTopicEvent) state_key=\"\"\n"));
    }

    #[test]
    fn explicit_type_mismatch_fails() {
        let err = decode(
            r#"{"type":"m.room.name","state_key":"","content":{}}"#,
            &DecodeOptions {
                event_type: Some("m.room.topic"),
                pretty: false,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Event(e) if e.kind() == ErrorKind::InvalidType));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = decode("{", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }
}
