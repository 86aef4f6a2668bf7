//! Decomposition client configuration parsed from environment variables.

use crate::error::DecomposeError;
use std::ops::RangeInclusive;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_NUM_LAYERS: u32 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Layer counts the backend accepts.
pub const LAYER_COUNT_RANGE: RangeInclusive<u32> = 3..=8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposeConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Base URL that relative asset paths (the sample image) resolve against.
    pub asset_url: String,
    pub num_layers: u32,
    pub timeouts: Timeouts,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            asset_url: DEFAULT_API_URL.to_string(),
            num_layers: DEFAULT_NUM_LAYERS,
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }
}

impl DecomposeConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `LAYERDECK_API_URL`: default `http://127.0.0.1:8000`
    /// - `LAYERDECK_ASSET_URL`: default the API URL
    /// - `LAYERDECK_NUM_LAYERS`: default 5, must be within 3..=8
    /// - `LAYERDECK_TIMEOUT_SECS`: default 120
    /// - `LAYERDECK_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, DecomposeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DecomposeConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, DecomposeError> {
        let api_url = var("LAYERDECK_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let asset_url = var("LAYERDECK_ASSET_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| api_url.clone());

        let num_layers = match var("LAYERDECK_NUM_LAYERS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                DecomposeError::InvalidInput(format!("LAYERDECK_NUM_LAYERS is not a number: {raw}"))
            })?,
            None => DEFAULT_NUM_LAYERS,
        };
        check_layer_count(num_layers)?;

        let timeouts = Timeouts {
            request_secs: parse_u64(
                &var,
                "LAYERDECK_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_secs: parse_u64(
                &var,
                "LAYERDECK_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        };

        Ok(Self {
            api_url,
            asset_url,
            num_layers,
            timeouts,
        })
    }
}

/// Reject layer counts outside [`LAYER_COUNT_RANGE`].
pub fn check_layer_count(n: u32) -> Result<u32, DecomposeError> {
    if LAYER_COUNT_RANGE.contains(&n) {
        Ok(n)
    } else {
        Err(DecomposeError::InvalidInput(format!(
            "layer count {n} out of range {}..={}",
            LAYER_COUNT_RANGE.start(),
            LAYER_COUNT_RANGE.end()
        )))
    }
}

fn parse_u64(var: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    var(key).and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DecomposeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DecomposeConfig::default());
        assert_eq!(config.timeouts.request_secs, 120);
        assert_eq!(config.timeouts.connect_secs, 10);
    }

    #[test]
    fn overrides_and_trailing_slash() {
        let config = DecomposeConfig::from_lookup(lookup(&[
            ("LAYERDECK_API_URL", "http://ai.local:9000/"),
            ("LAYERDECK_NUM_LAYERS", "8"),
            ("LAYERDECK_TIMEOUT_SECS", "30"),
            ("LAYERDECK_CONNECT_TIMEOUT_SECS", "nope"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://ai.local:9000");
        assert_eq!(config.asset_url, "http://ai.local:9000");
        assert_eq!(config.num_layers, 8);
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.timeouts.connect_secs, 10);
    }

    #[test]
    fn layer_count_out_of_range_is_rejected() {
        let vars = lookup(&[("LAYERDECK_NUM_LAYERS", "12")]);
        let err = DecomposeConfig::from_lookup(vars).unwrap_err();
        assert!(matches!(err, DecomposeError::InvalidInput(_)));
        assert!(check_layer_count(2).is_err());
        assert_eq!(check_layer_count(3).ok(), Some(3));
    }
}
