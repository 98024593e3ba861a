//! Keys shared by every VoIP call event.

use roomkit_core::Result;

use crate::event::Layer;
use crate::json::{self, Object};

/// Owns `content.call_id` and `content.version`, both mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLayer {
    call_id: Option<String>,
    version: Option<u64>,
}

impl CallLayer {
    pub fn new(call_id: impl Into<String>, version: u64) -> Self {
        Self {
            call_id: Some(call_id.into()),
            version: Some(version),
        }
    }

    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    pub fn set_call_id(&mut self, call_id: impl Into<String>) {
        self.call_id = Some(call_id.into());
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn set_version(&mut self, version: u64) {
        self.version = Some(version);
    }
}

impl Layer for CallLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        let Some(content) = json::content(json)? else {
            return Ok(());
        };
        if let Some(call_id) = json::get_string(content, "call_id")? {
            self.call_id = Some(call_id);
        }
        if let Some(version) = json::get_u64(content, "version")? {
            self.version = Some(version);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let content = json::content_mut(json)?;
        json::put_required(content, "call_id", self.call_id.as_deref(), "call_id")?;
        json::put_required(content, "version", self.version, "call version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomkit_core::ErrorKind;
    use serde_json::{Value, json};

    #[test]
    fn roundtrip_keys() {
        let mut call = CallLayer::default();
        call.populate(
            json!({"content": {"call_id": "c1", "version": 0}})
                .as_object()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(call, CallLayer::new("c1", 0));

        let mut out = Object::new();
        call.serialize(&mut out).unwrap();
        assert_eq!(
            Value::Object(out),
            json!({"content": {"call_id": "c1", "version": 0}})
        );
    }

    #[test]
    fn missing_call_id_is_incomplete() {
        let mut call = CallLayer::default();
        call.set_version(0);
        let mut out = Object::new();
        assert_eq!(
            call.serialize(&mut out).unwrap_err().kind(),
            ErrorKind::Incomplete
        );
    }

    #[test]
    fn missing_version_is_incomplete() {
        let mut call = CallLayer::default();
        call.set_call_id("c1");
        let mut out = Object::new();
        assert_eq!(
            call.serialize(&mut out).unwrap_err().kind(),
            ErrorKind::Incomplete
        );
    }
}
