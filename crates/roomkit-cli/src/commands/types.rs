//! `roomkit types`: list what the registries know about.

use std::io::{self, Write};

use crate::error::ClientResult;

pub fn run() -> ClientResult<()> {
    let stdout = io::stdout();
    list(&mut stdout.lock())
}

/// Writes every registered event type with its Rust type, then every
/// message type.
pub fn list(out: &mut impl Write) -> ClientResult<()> {
    writeln!(out, "event types:")?;
    for tag in roomkit_events::registered_types() {
        let type_name = roomkit_events::get_handler(&tag)
            .map(|handler| handler.type_name())
            .unwrap_or("-");
        writeln!(out, "  {tag:<28} {type_name}")?;
    }
    writeln!(out, "message types:")?;
    for msgtype in roomkit_events::registered_message_types() {
        writeln!(out, "  {msgtype}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtins() {
        let mut out = Vec::new();
        list(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("event types:\n"));
        assert!(text.contains("  m.room.member"));
        assert!(text.contains("RoomMemberEvent"));
        assert!(text.contains("message types:\n"));
        assert!(text.contains("  m.location\n"));
    }
}
