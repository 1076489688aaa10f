use serde::{Deserialize, Serialize};
use std::fmt;

fn default_token_ttl_seconds() -> u64 {
    3600
}

/// LiveKit server connection settings for the worker.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    pub url: String,
    pub api_key: String,
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// JWT token TTL in seconds for LiveKit join tokens. Default: 3600 (1 hour).
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Returns the server URL with an HTTP scheme, for Twirp service
    /// calls (egress). `ws://` becomes `http://`, `wss://` becomes
    /// `https://`; HTTP URLs pass through unchanged.
    pub fn http_url(&self) -> String {
        if let Some(rest) = self.url.strip_prefix("wss://") {
            format!("https://{rest}")
        } else if let Some(rest) = self.url.strip_prefix("ws://") {
            format!("http://{rest}")
        } else {
            self.url.clone()
        }
    }
}

/// S3-compatible storage target for call recordings.
///
/// An empty bucket or missing credentials disable recording; calls
/// proceed without it.
#[derive(Clone, Default, Deserialize)]
pub struct S3Target {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    /// Custom endpoint for S3-compatible stores. Empty means AWS S3.
    pub endpoint: String,
}

impl fmt::Debug for S3Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Target")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl S3Target {
    /// True when the target is complete enough to upload recordings.
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty() && !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_converts_websocket_schemes() {
        let config = LiveKitConfig::new("ws://localhost:7880", "key", "secret");
        assert_eq!(config.http_url(), "http://localhost:7880");

        let config = LiveKitConfig::new("wss://voice.example.livekit.cloud", "key", "secret");
        assert_eq!(config.http_url(), "https://voice.example.livekit.cloud");

        let config = LiveKitConfig::new("https://voice.example.com", "key", "secret");
        assert_eq!(config.http_url(), "https://voice.example.com");
    }

    #[test]
    fn debug_redacts_api_secret() {
        let config = LiveKitConfig::new("ws://localhost:7880", "devkey", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn s3_target_configured_requires_bucket_and_credentials() {
        let mut target = S3Target::default();
        assert!(!target.is_configured());

        target.bucket = "call-recordings".to_string();
        assert!(!target.is_configured());

        target.access_key = "AKIA123".to_string();
        target.secret_key = "secret".to_string();
        assert!(target.is_configured());
    }

    #[test]
    fn s3_target_debug_redacts_secret_key() {
        let target = S3Target {
            bucket: "b".to_string(),
            region: "us-east-1".to_string(),
            access_key: "ak".to_string(),
            secret_key: "very-secret".to_string(),
            endpoint: String::new(),
        };
        let rendered = format!("{target:?}");
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn token_ttl_defaults_when_absent_from_toml() {
        let toml_str = r#"
            url = "ws://localhost:7880"
            api_key = "key"
            api_secret = "secret"
        "#;
        let config: LiveKitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.token_ttl_seconds, 3600);
    }
}
