//! A user-picked image file, validated before any network call.

use crate::error::DecomposeError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SourceImage {
    file_name: String,
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl SourceImage {
    /// Accept `bytes` only if they sniff as a known raster format.
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, DecomposeError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(DecomposeError::InvalidInput(format!("{file_name} is empty")));
        }
        let format = image::guess_format(&bytes).map_err(|_| {
            DecomposeError::InvalidInput(format!("{file_name} is not an image file"))
        })?;
        Ok(Self {
            file_name,
            bytes,
            format,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DecomposeError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| {
                DecomposeError::InvalidInput(format!("cannot read {}: {e}", path.display()))
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self::from_bytes(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// File name without its last extension: `"photo.v2.png"` -> `"photo.v2"`.
    /// Names whose only dot is leading, like `".png"`, are kept whole.
    pub fn base_name(&self) -> &str {
        base_name(&self.file_name)
    }

    /// Natural pixel size read from the header.
    pub fn dimensions(&self) -> Result<(u32, u32), DecomposeError> {
        image_size(&self.file_name, &self.bytes)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime(), BASE64_STANDARD.encode(&self.bytes))
    }
}

pub(crate) fn base_name(file_name: &str) -> &str {
    let Some(dot) = file_name.rfind('.') else {
        return file_name;
    };
    let (stem, ext) = (&file_name[..dot], &file_name[dot + 1..]);
    if stem.is_empty() || stem.ends_with('/') || ext.is_empty() || ext.contains('/') {
        file_name
    } else {
        stem
    }
}

/// Width and height of encoded image bytes. `src` only labels errors.
pub fn image_size(src: &str, bytes: &[u8]) -> Result<(u32, u32), DecomposeError> {
    let probe_err = |message: String| DecomposeError::Probe {
        src: src.to_string(),
        message,
    };
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| probe_err(e.to_string()))?
        .into_dimensions()
        .map_err(|e| probe_err(e.to_string()))
}
