//! Fetching and sizing the image resources the backend returns.

use crate::config::DecomposeConfig;
use crate::error::DecomposeError;
use crate::source::image_size;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use ld_core::ImageRef;
use std::time::Duration;

/// Reads image resources by reference. Only `fetch` is required; the
/// natural size is decoded from the fetched header.
#[async_trait::async_trait]
pub trait ImageProbe: Send + Sync {
    async fn fetch(&self, src: &ImageRef) -> Result<Vec<u8>, DecomposeError>;

    async fn dimensions(&self, src: &ImageRef) -> Result<(u32, u32), DecomposeError> {
        let bytes = self.fetch(src).await?;
        image_size(&src.to_string(), &bytes)
    }
}

/// Resolves `data:` URIs locally and everything else over HTTP(S).
pub struct HttpImageProbe {
    http: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new(config: &DecomposeConfig) -> Result<Self, DecomposeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| DecomposeError::HttpClientBuild(e.to_string()))?;
        Ok(Self::with_client(http))
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl ImageProbe for HttpImageProbe {
    async fn fetch(&self, src: &ImageRef) -> Result<Vec<u8>, DecomposeError> {
        let raw = src.as_str();
        if src.is_data_uri() {
            return decode_data_uri(raw).map_err(|message| DecomposeError::Probe {
                src: src.to_string(),
                message,
            });
        }
        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(DecomposeError::Probe {
                src: src.to_string(),
                message: "unsupported scheme".into(),
            });
        }

        log::debug!("fetching {raw}");
        let probe_err = |e: reqwest::Error| DecomposeError::Probe {
            src: src.to_string(),
            message: e.to_string(),
        };
        let response = self
            .http
            .get(raw)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(probe_err)?;
        let bytes = response.bytes().await.map_err(probe_err)?;
        Ok(bytes.to_vec())
    }
}

/// Payload of a `data:[<mime>][;base64],<data>` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let rest = uri.strip_prefix("data:").ok_or("not a data URI")?;
    let (header, payload) = rest.split_once(',').ok_or("data URI has no payload")?;
    if header.ends_with(";base64") {
        BASE64_STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("invalid base64: {e}"))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::png;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_base64_payload() {
        let uri = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(b"abc"));
        assert_eq!(decode_data_uri(&uri).unwrap(), b"abc".to_vec());
        assert_eq!(decode_data_uri("data:text/plain,hi").unwrap(), b"hi".to_vec());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("https://x/y.png").is_err());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    }

    #[tokio::test]
    async fn sizes_data_uri_without_network() {
        let probe = HttpImageProbe::with_client(reqwest::Client::new());
        let uri = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(png(7, 5)));
        assert_eq!(probe.dimensions(&ImageRef::new(uri)).await.unwrap(), (7, 5));
    }

    #[tokio::test]
    async fn unknown_scheme_cannot_be_sized() {
        let probe = HttpImageProbe::with_client(reqwest::Client::new());
        let err = probe.dimensions(&ImageRef::new("ftp://host/a.png")).await.unwrap_err();
        assert!(matches!(err, DecomposeError::Probe { .. }));
    }
}
