//! HTTP client for the layer decomposition backend.
//!
//! `POST {base}/api/decompose` with a multipart body (`image`, `num_layers`).
//! Success is `{"layers": [url, ...], "count": n}`; failures carry
//! `{"detail": ...}`.

use crate::config::{DecomposeConfig, check_layer_count};
use crate::error::DecomposeError;
use crate::source::SourceImage;
use ld_core::ImageRef;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

#[async_trait::async_trait]
pub trait Decomposer: Send + Sync {
    /// Base address, used in error messages.
    fn backend(&self) -> &str;

    /// Split `image` into about `num_layers` RGBA layers, back to front.
    async fn decompose(
        &self,
        image: &SourceImage,
        num_layers: u32,
    ) -> Result<Vec<ImageRef>, DecomposeError>;
}

#[derive(Debug, Deserialize)]
struct DecomposeResponse {
    layers: Vec<String>,
    #[serde(default)]
    count: Option<usize>,
}

pub struct HttpDecomposer {
    http: reqwest::Client,
    base_url: String,
    request_secs: u64,
}

impl HttpDecomposer {
    pub fn new(config: &DecomposeConfig) -> Result<Self, DecomposeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| DecomposeError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            request_secs: config.timeouts.request_secs,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DecomposeError {
        if e.is_timeout() {
            DecomposeError::TimedOut {
                backend: self.base_url.clone(),
                secs: self.request_secs,
            }
        } else {
            DecomposeError::Unreachable {
                backend: self.base_url.clone(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait::async_trait]
impl Decomposer for HttpDecomposer {
    fn backend(&self) -> &str {
        &self.base_url
    }

    async fn decompose(
        &self,
        image: &SourceImage,
        num_layers: u32,
    ) -> Result<Vec<ImageRef>, DecomposeError> {
        let num_layers = check_layer_count(num_layers)?;
        let url = format!("{}/api/decompose", self.base_url);

        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime())
            .map_err(|e| DecomposeError::InvalidInput(e.to_string()))?;
        let form = Form::new().part("image", part).text("num_layers", num_layers.to_string());

        log::debug!("POST {url} ({} bytes, {num_layers} layers)", image.bytes().len());
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(DecomposeError::Status {
                backend: self.base_url.clone(),
                status: status.as_u16(),
                detail: error_detail(&body, status.canonical_reason()),
            });
        }

        let parsed: DecomposeResponse =
            serde_json::from_str(&body).map_err(|e| DecomposeError::Response(e.to_string()))?;
        if let Some(count) = parsed.count.filter(|c| *c != parsed.layers.len()) {
            log::warn!("backend reported count {count} for {} layers", parsed.layers.len());
        }
        log::debug!("backend returned {} layers", parsed.layers.len());

        Ok(parsed.layers.into_iter().map(ImageRef::new).collect())
    }
}

/// `detail` from an error body; validation errors carry a structured value.
fn error_detail(body: &str, reason: Option<&str>) -> String {
    let fallback = || reason.unwrap_or("request failed").to_string();
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => fallback(),
        },
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detail_extraction() {
        assert_eq!(
            error_detail(r#"{"detail":"Decomposition failed: boom"}"#, Some("Bad Gateway")),
            "Decomposition failed: boom"
        );
        assert_eq!(error_detail(r#"{"detail":[{"loc":"x"}]}"#, None), r#"[{"loc":"x"}]"#);
        assert_eq!(error_detail("", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_detail("upstream down", None), "upstream down");
        assert_eq!(error_detail("{}", None), "request failed");
    }

    #[test]
    fn base_url_is_normalised() {
        let config = DecomposeConfig {
            api_url: "http://ai.local/".into(),
            ..DecomposeConfig::default()
        };
        let client = HttpDecomposer::new(&config).unwrap();
        assert_eq!(client.backend(), "http://ai.local");
    }
}
