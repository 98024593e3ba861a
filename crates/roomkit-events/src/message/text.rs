//! Text-like messages: `m.text`, `m.emote` and `m.notice`.

use roomkit_core::Result;

use super::{MessageBase, impl_message};
use crate::event::Layer;
use crate::json::{self, Object};

/// Owns the optional rich-text pair `format` / `formatted_body`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedLayer {
    pub format: Option<String>,
    pub formatted_body: Option<String>,
}

impl FormattedLayer {
    pub const HTML: &'static str = "org.matrix.custom.html";

    pub fn html(formatted_body: impl Into<String>) -> Self {
        Self {
            format: Some(Self::HTML.to_string()),
            formatted_body: Some(formatted_body.into()),
        }
    }
}

impl Layer for FormattedLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(format) = json::get_string(json, "format")? {
            self.format = Some(format);
        }
        if let Some(formatted_body) = json::get_string(json, "formatted_body")? {
            self.formatted_body = Some(formatted_body);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json, "format", self.format.as_deref());
        json::put_opt(json, "formatted_body", self.formatted_body.as_deref());
        Ok(())
    }
}

macro_rules! text_message {
    ($(#[$meta:meta])* $name:ident, $msgtype:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            base: MessageBase,
            pub formatted: FormattedLayer,
        }

        impl $name {
            pub const MSGTYPE: &'static str = $msgtype;

            pub fn new(body: impl Into<String>) -> Self {
                let mut message = Self::default();
                message.base.set_body(body);
                message
            }

            #[must_use]
            pub fn with_html(mut self, formatted_body: impl Into<String>) -> Self {
                self.formatted = FormattedLayer::html(formatted_body);
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    base: MessageBase::new(Self::MSGTYPE),
                    formatted: FormattedLayer::default(),
                }
            }
        }

        impl_message!($name => [formatted]);
    };
}

text_message!(
    /// A plain chat message.
    TextMessage,
    "m.text"
);
text_message!(
    /// An action, rendered like `/me waves`.
    EmoteMessage,
    "m.emote"
);
text_message!(
    /// A message from a bot; clients should not reply to it automatically.
    NoticeMessage,
    "m.notice"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageContent;
    use serde_json::json;

    #[test]
    fn html_text_roundtrip() {
        let message = TextMessage::new("*hi*").with_html("<b>hi</b>");
        let value = message.to_json().unwrap();
        assert_eq!(
            value,
            json!({
                "msgtype": "m.text",
                "body": "*hi*",
                "format": "org.matrix.custom.html",
                "formatted_body": "<b>hi</b>"
            })
        );

        let mut decoded = TextMessage::default();
        decoded
            .populate_from_json(value.as_object().unwrap())
            .unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn emote_omits_formatting() {
        let value = EmoteMessage::new("waves").to_json().unwrap();
        assert_eq!(value, json!({"msgtype": "m.emote", "body": "waves"}));
    }
}
