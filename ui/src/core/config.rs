//! Runtime configuration for the client.
//!
//! Values come from compile-time environment (`option_env!`, which also works
//! for WASM builds) and, on native targets, from the process environment at
//! startup. Anything unparseable falls back to the default.

use tracing::{info, warn};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";
pub const DEFAULT_DEMO_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?w=600";
/// 3 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;
pub const DEFAULT_HISTORY_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Analysis endpoint receiving the multipart upload.
    pub endpoint: String,
    pub demo_image_url: String,
    pub max_upload_bytes: u64,
    pub history_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            demo_image_url: DEFAULT_DEMO_IMAGE_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("DEEPDETECT_ENDPOINT", option_env!("DEEPDETECT_ENDPOINT")) {
            match validated_url(&endpoint) {
                Some(url) => config.endpoint = url,
                None => warn!("invalid DEEPDETECT_ENDPOINT {endpoint:?}, using {DEFAULT_ENDPOINT}"),
            }
        }

        if let Some(demo) = lookup("DEEPDETECT_DEMO_URL", option_env!("DEEPDETECT_DEMO_URL")) {
            match validated_url(&demo) {
                Some(url) => config.demo_image_url = url,
                None => warn!("invalid DEEPDETECT_DEMO_URL {demo:?}, using default"),
            }
        }

        info!(endpoint = %config.endpoint, "client configured");
        config
    }
}

/// Runtime value first (native only), then the value baked in at build time.
fn lookup(key: &str, baked: Option<&'static str>) -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(value) = std::env::var(key) {
            return Some(value);
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = key;

    baked.map(str::to_string)
}

fn validated_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = reqwest::Url::parse(trimmed).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_backend() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/analyze");
        assert_eq!(config.max_upload_bytes, 3_145_728);
        assert_eq!(config.history_capacity, 3);
    }

    #[test]
    fn only_http_urls_are_accepted() {
        assert_eq!(
            validated_url(" https://example.com/analyze "),
            Some("https://example.com/analyze".to_string())
        );
        assert_eq!(validated_url("ftp://example.com"), None);
        assert_eq!(validated_url("not a url"), None);
    }
}
