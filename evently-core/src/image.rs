//! Text encoding for event images.
//!
//! Storage only holds strings, so images are kept as `data:` URLs with a
//! base64 payload.

use std::fmt;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{EventlyError, EventlyResult};

/// An image already encoded as a `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Self {
        EncodedImage(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mime type from the `data:` prefix, if present.
    pub fn mime(&self) -> Option<&str> {
        self.0.strip_prefix("data:")?.split(';').next()
    }
}

impl From<&str> for EncodedImage {
    fn from(s: &str) -> Self {
        EncodedImage(s.to_string())
    }
}

impl From<String> for EncodedImage {
    fn from(s: String) -> Self {
        EncodedImage(s)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mime() {
            Some(mime) => write!(f, "{} ({} chars)", mime, self.0.len()),
            None => write!(f, "({} chars)", self.0.len()),
        }
    }
}

/// Read an image file and encode it.
pub async fn encode_file(path: &Path) -> EventlyResult<EncodedImage> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        EventlyError::ImageEncoding(format!("Could not read {}: {e}", path.display()))
    })?;

    if bytes.is_empty() {
        return Err(EventlyError::ImageEncoding(format!(
            "{} is empty",
            path.display()
        )));
    }

    Ok(EncodedImage::from_bytes(&bytes, mime_for(path)))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
