//! Typed reads and writes on `serde_json` objects.
//!
//! Readers return `Ok(None)` for an absent key and
//! [`ErrorKind::InvalidFormat`](roomkit_core::ErrorKind::InvalidFormat) for a
//! key holding the wrong JSON type. JSON `null` counts as absent.

use roomkit_core::{Error, Result, WireEnum};
use serde_json::{Map, Number, Value};

pub type Object = Map<String, Value>;

fn present<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn wrong_type(key: &str, expected: &str) -> Error {
    Error::invalid_format(format!("{key} must be {expected}"))
}

pub fn get_str<'a>(object: &'a Object, key: &str) -> Result<Option<&'a str>> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(wrong_type(key, "a string")),
    }
}

pub fn get_string(object: &Object, key: &str) -> Result<Option<String>> {
    Ok(get_str(object, key)?.map(str::to_string))
}

pub fn get_u64(object: &Object, key: &str) -> Result<Option<u64>> {
    match present(object, key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "a non-negative integer")),
    }
}

/// Reads a number without converting it, so integers stay integers.
pub fn get_number(object: &Object, key: &str) -> Result<Option<Number>> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(wrong_type(key, "a number")),
    }
}

pub fn get_bool(object: &Object, key: &str) -> Result<Option<bool>> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(wrong_type(key, "a boolean")),
    }
}

pub fn get_object<'a>(object: &'a Object, key: &str) -> Result<Option<&'a Object>> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::Object(o)) => Ok(Some(o)),
        Some(_) => Err(wrong_type(key, "an object")),
    }
}

pub fn get_array<'a>(object: &'a Object, key: &str) -> Result<Option<&'a Vec<Value>>> {
    match present(object, key) {
        None => Ok(None),
        Some(Value::Array(a)) => Ok(Some(a)),
        Some(_) => Err(wrong_type(key, "an array")),
    }
}

/// Reads an array of strings.
pub fn get_string_list(object: &Object, key: &str) -> Result<Option<Vec<String>>> {
    let Some(items) = get_array(object, key)? else {
        return Ok(None);
    };
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_type(key, "an array of strings"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Reads an enumerated string. Unknown symbols decode to the sentinel.
pub fn get_enum<E: WireEnum>(object: &Object, key: &str) -> Result<Option<E>> {
    Ok(get_str(object, key)?.map(E::from_wire))
}

/// The `content` object of an event, if present.
pub fn content(object: &Object) -> Result<Option<&Object>> {
    get_object(object, "content")
}

/// The `content` object of an event being written, created on first use.
pub fn content_mut(object: &mut Object) -> Result<&mut Object> {
    child_mut(object, "content")
}

/// A nested object being written, created on first use.
pub fn child_mut<'a>(object: &'a mut Object, key: &str) -> Result<&'a mut Object> {
    match object
        .entry(key)
        .or_insert_with(|| Value::Object(Object::new()))
    {
        Value::Object(child) => Ok(child),
        _ => Err(wrong_type(key, "an object")),
    }
}

pub fn put(object: &mut Object, key: &str, value: impl Into<Value>) {
    object.insert(key.to_string(), value.into());
}

/// Writes `value` if it is set; unset optional fields are omitted.
pub fn put_opt<V: Into<Value>>(object: &mut Object, key: &str, value: Option<V>) {
    if let Some(value) = value {
        put(object, key, value);
    }
}

/// Writes a mandatory field, failing with `Incomplete` if it is unset.
pub fn put_required<V: Into<Value>>(
    object: &mut Object,
    key: &str,
    value: Option<V>,
    what: &str,
) -> Result<()> {
    let value = value.ok_or_else(|| Error::incomplete(format!("{what} is not set")))?;
    put(object, key, value);
    Ok(())
}

/// Writes a mandatory enumerated field.
///
/// Unset is `Incomplete`; the `Unknown` sentinel is `UnknownValue`.
pub fn put_enum<E: WireEnum>(
    object: &mut Object,
    key: &str,
    value: Option<E>,
    what: &str,
) -> Result<()> {
    let value = value.ok_or_else(|| Error::incomplete(format!("{what} is not set")))?;
    put(object, key, value.to_wire()?);
    Ok(())
}
