//! The `state_key` envelope key.

use roomkit_core::{Error, Result};

use crate::event::Layer;
use crate::json::{self, Object};

/// Owns `state_key`, which every state event must carry.
///
/// Types whose key is always the empty string start from
/// [`StateLayer::empty_key`]; types keyed by something meaningful (a user
/// id, an invite token) start unset and fail to serialize until it is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateLayer {
    state_key: Option<String>,
}

impl StateLayer {
    pub fn empty_key() -> Self {
        Self {
            state_key: Some(String::new()),
        }
    }

    pub fn state_key(&self) -> Option<&str> {
        self.state_key.as_deref()
    }

    pub fn set_state_key(&mut self, state_key: impl Into<String>) {
        self.state_key = Some(state_key.into());
    }
}

impl Layer for StateLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(state_key) = json::get_string(json, "state_key")? {
            self.state_key = Some(state_key);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        let state_key = self
            .state_key
            .as_deref()
            .ok_or_else(|| Error::incomplete("state_key is not set"))?;
        json::put(json, "state_key", state_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomkit_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn empty_key_serializes() {
        let mut out = Object::new();
        StateLayer::empty_key().serialize(&mut out).unwrap();
        assert_eq!(out.get("state_key"), Some(&json!("")));
    }

    #[test]
    fn unset_key_is_incomplete() {
        let mut out = Object::new();
        let err = StateLayer::default().serialize(&mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Incomplete);
    }

    #[test]
    fn populate_overrides_default() {
        let mut state = StateLayer::empty_key();
        state
            .populate(json!({"state_key": "@bob:example.org"}).as_object().unwrap())
            .unwrap();
        assert_eq!(state.state_key(), Some("@bob:example.org"));
    }
}
