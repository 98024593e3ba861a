//! Messages pointing at uploaded content: `m.image` and `m.file`.

use roomkit_core::Result;

use super::{MessageBase, impl_message};
use crate::event::Layer;
use crate::json::{self, Object};

/// Owns `url` (mandatory) and the free-form `info` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaLayer {
    pub url: Option<String>,
    pub info: Option<Object>,
}

impl MediaLayer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            info: None,
        }
    }

    /// Size in bytes, from `info.size`.
    pub fn size(&self) -> Option<u64> {
        self.info
            .as_ref()
            .and_then(|info| info.get("size"))
            .and_then(|size| size.as_u64())
    }

    pub fn mimetype(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|info| info.get("mimetype"))
            .and_then(|mimetype| mimetype.as_str())
    }
}

impl Layer for MediaLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(url) = json::get_string(json, "url")? {
            self.url = Some(url);
        }
        if let Some(info) = json::get_object(json, "info")? {
            self.info = Some(info.clone());
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_required(json, "url", self.url.as_deref(), "media url")?;
        json::put_opt(json, "info", self.info.clone());
        Ok(())
    }
}

/// An image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMessage {
    base: MessageBase,
    pub media: MediaLayer,
}

impl ImageMessage {
    pub const MSGTYPE: &'static str = "m.image";

    pub fn new(body: impl Into<String>, url: impl Into<String>) -> Self {
        let mut message = Self::default();
        message.base.set_body(body);
        message.media = MediaLayer::new(url);
        message
    }
}

impl Default for ImageMessage {
    fn default() -> Self {
        Self {
            base: MessageBase::new(Self::MSGTYPE),
            media: MediaLayer::default(),
        }
    }
}

impl_message!(ImageMessage => [media]);

/// Owns the original file name of an `m.file`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNameLayer {
    pub filename: Option<String>,
}

impl Layer for FileNameLayer {
    fn populate(&mut self, json: &Object) -> Result<()> {
        if let Some(filename) = json::get_string(json, "filename")? {
            self.filename = Some(filename);
        }
        Ok(())
    }

    fn serialize(&self, json: &mut Object) -> Result<()> {
        json::put_opt(json, "filename", self.filename.as_deref());
        Ok(())
    }
}

/// A generic file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMessage {
    base: MessageBase,
    pub file: FileNameLayer,
    pub media: MediaLayer,
}

impl FileMessage {
    pub const MSGTYPE: &'static str = "m.file";

    pub fn new(body: impl Into<String>, url: impl Into<String>) -> Self {
        let mut message = Self::default();
        message.base.set_body(body);
        message.media = MediaLayer::new(url);
        message
    }
}

impl Default for FileMessage {
    fn default() -> Self {
        Self {
            base: MessageBase::new(Self::MSGTYPE),
            file: FileNameLayer::default(),
            media: MediaLayer::default(),
        }
    }
}

impl_message!(FileMessage => [file, media]);
