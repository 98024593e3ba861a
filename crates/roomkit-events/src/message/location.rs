//! `m.location`.

use roomkit_core::Result;

use super::{MessageBase, impl_message};
use crate::event::Layer;
use crate::json::{self, Object};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLayer {
    /// A `geo:` URI, e.g. `geo:51.5008,0.1247`.
    pub geo_uri: Option<String>,
    pub info: Option<Object>,
}

impl Layer for GeoLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(geo_uri) = json::get_string(json, "geo_uri")? {
            self.geo_uri = Some(geo_uri);
        }
        if let Some(info) = json::get_object(json, "info")? {
            self.info = Some(info.clone());
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "geo_uri", self.geo_uri.as_deref(), "geo_uri")?;
        json::put_opt(json, "info", self.info.clone());
        Ok(())
    }
}

/// A shared location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMessage {
    base: MessageBase,
    pub geo: GeoLayer,
}

impl LocationMessage {
    pub const MSGTYPE: &'static str = "m.location";

    pub fn new(body: impl Into<String>, geo_uri: impl Into<String>) -> Self {
        let mut message = Self::default();
        message.base.set_body(body);
        message.geo.geo_uri = Some(geo_uri.into());
        message
    }

    /// Latitude and longitude parsed from the `geo:` URI.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let rest = self.geo.geo_uri.as_deref()?.strip_prefix("geo:")?;
        let rest = rest.split(';').next()?;
        let mut parts = rest.split(',');
        let latitude = parts.next()?.trim().parse().ok()?;
        let longitude = parts.next()?.trim().parse().ok()?;
        Some((latitude, longitude))
    }
}

impl Default for LocationMessage {
    fn default() -> Self {
        Self {
            base: MessageBase::new(Self::MSGTYPE),
            geo: GeoLayer::default(),
        }
    }
}

impl_message!(LocationMessage => [geo]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        let location = LocationMessage::new("Big Ben", "geo:51.5008,0.1247;u=35");
        assert_eq!(location.coordinates(), Some((51.5008, 0.1247)));
    }

    #[test]
    fn bad_uri_has_no_coordinates() {
        let location = LocationMessage::new("somewhere", "https://example.org");
        assert_eq!(location.coordinates(), None);
    }
}
