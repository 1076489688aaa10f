//! Worker configuration loading from file and environment variables.
//!
//! All provider credentials, URLs, and practice defaults come from a
//! TOML file and/or environment variables. Env vars override file
//! values; a missing file falls back to defaults so the worker always
//! starts. Provider credentials use the provider-standard variable
//! names (`LIVEKIT_API_KEY`, `DEEPGRAM_API_KEY`, …); worker-own
//! settings use the `FRONTDESK_` prefix.

use frontdesk_types::{PracticeConfig, TtsProvider};
use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level worker configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// LiveKit server credentials.
    #[serde(default)]
    pub livekit: LiveKitSettings,

    /// Anthropic LLM settings.
    #[serde(default)]
    pub anthropic: AnthropicSettings,

    /// Deepgram STT/TTS settings.
    #[serde(default)]
    pub deepgram: DeepgramSettings,

    /// TTS provider selection and per-provider credentials.
    #[serde(default)]
    pub tts: TtsSettings,

    /// Backend platform API settings.
    #[serde(default)]
    pub platform: PlatformSettings,

    /// Call recording storage settings.
    #[serde(default)]
    pub recording: RecordingSettings,

    /// Fallback practice used when the platform cannot resolve one.
    #[serde(default)]
    pub practice: PracticeDefaults,

    /// Agent persona settings.
    #[serde(default)]
    pub agent: AgentSettings,

    /// Health endpoint network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// LiveKit server connection settings.
#[derive(Clone, Deserialize)]
pub struct LiveKitSettings {
    #[serde(default = "default_livekit_url")]
    pub url: String,
    #[serde(default = "default_livekit_key")]
    pub api_key: String,
    #[serde(default = "default_livekit_secret")]
    pub api_secret: String,
}

impl fmt::Debug for LiveKitSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitSettings")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Anthropic LLM settings.
#[derive(Clone, Deserialize)]
pub struct AnthropicSettings {
    #[serde(default)]
    pub api_key: String,
    /// Model identifier passed to the runtime's LLM adapter.
    #[serde(default = "default_anthropic_model")]
    pub model: String,
}

impl fmt::Debug for AnthropicSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicSettings")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Deepgram credentials, shared by STT and Aura TTS.
#[derive(Clone, Default, Deserialize)]
pub struct DeepgramSettings {
    #[serde(default)]
    pub api_key: String,
}

impl fmt::Debug for DeepgramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepgramSettings")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// TTS provider selection plus per-provider credentials.
#[derive(Clone, Deserialize)]
pub struct TtsSettings {
    /// Default provider when the practice does not specify one.
    #[serde(default)]
    pub provider: TtsProvider,
    #[serde(default)]
    pub elevenlabs_api_key: String,
    #[serde(default)]
    pub elevenlabs_voice_id: String,
    #[serde(default)]
    pub cartesia_api_key: String,
    #[serde(default)]
    pub cartesia_voice_id: String,
}

impl fmt::Debug for TtsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtsSettings")
            .field("provider", &self.provider)
            .field("elevenlabs_api_key", &"[REDACTED]")
            .field("elevenlabs_voice_id", &self.elevenlabs_voice_id)
            .field("cartesia_api_key", &"[REDACTED]")
            .field("cartesia_voice_id", &self.cartesia_voice_id)
            .finish()
    }
}

/// Backend platform API settings.
#[derive(Clone, Deserialize)]
pub struct PlatformSettings {
    #[serde(default = "default_platform_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl fmt::Debug for PlatformSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// S3-compatible storage for call recordings.
///
/// An empty bucket disables recording (non-fatal, logged per call).
#[derive(Clone, Default, Deserialize)]
pub struct RecordingSettings {
    #[serde(default)]
    pub s3_bucket: String,
    #[serde(default = "default_s3_region")]
    pub s3_region: String,
    #[serde(default)]
    pub s3_access_key: String,
    #[serde(default)]
    pub s3_secret_key: String,
    /// Custom endpoint for S3-compatible stores. Empty means AWS S3.
    #[serde(default)]
    pub s3_endpoint: String,
}

impl fmt::Debug for RecordingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSettings")
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_region", &self.s3_region)
            .field("s3_access_key", &self.s3_access_key)
            .field("s3_secret_key", &"[REDACTED]")
            .field("s3_endpoint", &self.s3_endpoint)
            .finish()
    }
}

/// Fallback practice details used when the platform is unreachable or
/// no practice id can be resolved for a call.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeDefaults {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_practice_name")]
    pub name: String,
    #[serde(default = "default_practice_phone")]
    pub phone: String,
    #[serde(default = "default_practice_timezone")]
    pub timezone: String,
    #[serde(default = "default_practice_hours")]
    pub hours: String,
    #[serde(default = "default_practice_address")]
    pub address: String,
}

/// Agent persona settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    /// The receptionist's display name, spoken in every greeting.
    #[serde(default = "default_agent_name")]
    pub name: String,
}

/// Network configuration for the worker's health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "frontdesk_agent=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_livekit_url() -> String {
    "ws://localhost:7880".to_string()
}

fn default_livekit_key() -> String {
    "devkey".to_string()
}

fn default_livekit_secret() -> String {
    "secret".to_string()
}

fn default_anthropic_model() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_platform_url() -> String {
    "http://localhost:8700/api".to_string()
}

fn default_s3_region() -> String {
    "us-east-1".to_string()
}

fn default_practice_name() -> String {
    "Rivera Dental Care".to_string()
}

fn default_practice_phone() -> String {
    "(555) 867-5309".to_string()
}

fn default_practice_timezone() -> String {
    "America/Chicago".to_string()
}

fn default_practice_hours() -> String {
    "Mon-Fri 8am-5pm, Sat 9am-1pm".to_string()
}

fn default_practice_address() -> String {
    "742 Evergreen Terrace, Austin, TX 78701".to_string()
}

fn default_agent_name() -> String {
    "Relay".to_string()
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8710
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LiveKitSettings {
    fn default() -> Self {
        Self {
            url: default_livekit_url(),
            api_key: default_livekit_key(),
            api_secret: default_livekit_secret(),
        }
    }
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_anthropic_model(),
        }
    }
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            provider: TtsProvider::default(),
            elevenlabs_api_key: String::new(),
            elevenlabs_voice_id: String::new(),
            cartesia_api_key: String::new(),
            cartesia_voice_id: String::new(),
        }
    }
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            api_url: default_platform_url(),
            api_key: String::new(),
        }
    }
}

impl Default for PracticeDefaults {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: default_practice_name(),
            phone: default_practice_phone(),
            timezone: default_practice_timezone(),
            hours: default_practice_hours(),
            address: default_practice_address(),
        }
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Builds the env-default practice configuration used whenever the
    /// platform cannot resolve a practice for a call.
    pub fn default_practice(&self) -> PracticeConfig {
        PracticeConfig {
            practice_id: self.practice.id.clone(),
            practice_name: self.practice.name.clone(),
            practice_phone: self.practice.phone.clone(),
            practice_timezone: self.practice.timezone.clone(),
            practice_hours: self.practice.hours.clone(),
            practice_address: self.practice.address.clone(),
            practice_website: None,
            emergency_info: None,
            agent_name: self.agent.name.clone(),
            tts_provider: self.tts.provider,
            tts_voice_id: String::new(),
            knowledge_base: String::new(),
            providers: Vec::new(),
            services: Vec::new(),
            operating_hours: Vec::new(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides (applied after the file is parsed):
/// - `LIVEKIT_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET`
/// - `ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`
/// - `DEEPGRAM_API_KEY`
/// - `TTS_PROVIDER`, `ELEVENLABS_API_KEY`, `ELEVENLABS_VOICE_ID`,
///   `CARTESIA_API_KEY`, `CARTESIA_VOICE_ID`
/// - `PLATFORM_API_URL`, `PLATFORM_API_KEY`
/// - `RECORDING_S3_BUCKET`, `RECORDING_S3_REGION`,
///   `RECORDING_S3_ACCESS_KEY`, `RECORDING_S3_SECRET_KEY`,
///   `RECORDING_S3_ENDPOINT`
/// - `PRACTICE_ID`, `PRACTICE_NAME`, `PRACTICE_PHONE`,
///   `PRACTICE_TIMEZONE`, `PRACTICE_HOURS`, `PRACTICE_ADDRESS`
/// - `AGENT_NAME`
/// - `FRONTDESK_HOST`, `FRONTDESK_PORT`
/// - `FRONTDESK_LOG_LEVEL`, `FRONTDESK_LOG_JSON` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

fn env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

fn apply_env_overrides(config: &mut Config) {
    env_string("LIVEKIT_URL", &mut config.livekit.url);
    env_string("LIVEKIT_API_KEY", &mut config.livekit.api_key);
    env_string("LIVEKIT_API_SECRET", &mut config.livekit.api_secret);

    env_string("ANTHROPIC_API_KEY", &mut config.anthropic.api_key);
    env_string("ANTHROPIC_MODEL", &mut config.anthropic.model);

    env_string("DEEPGRAM_API_KEY", &mut config.deepgram.api_key);

    if let Ok(provider) = std::env::var("TTS_PROVIDER") {
        match provider.parse() {
            Ok(parsed) => config.tts.provider = parsed,
            Err(e) => tracing::warn!(error = %e, "ignoring invalid TTS_PROVIDER"),
        }
    }
    env_string("ELEVENLABS_API_KEY", &mut config.tts.elevenlabs_api_key);
    env_string("ELEVENLABS_VOICE_ID", &mut config.tts.elevenlabs_voice_id);
    env_string("CARTESIA_API_KEY", &mut config.tts.cartesia_api_key);
    env_string("CARTESIA_VOICE_ID", &mut config.tts.cartesia_voice_id);

    env_string("PLATFORM_API_URL", &mut config.platform.api_url);
    env_string("PLATFORM_API_KEY", &mut config.platform.api_key);

    env_string("RECORDING_S3_BUCKET", &mut config.recording.s3_bucket);
    env_string("RECORDING_S3_REGION", &mut config.recording.s3_region);
    env_string("RECORDING_S3_ACCESS_KEY", &mut config.recording.s3_access_key);
    env_string("RECORDING_S3_SECRET_KEY", &mut config.recording.s3_secret_key);
    env_string("RECORDING_S3_ENDPOINT", &mut config.recording.s3_endpoint);

    env_string("PRACTICE_ID", &mut config.practice.id);
    env_string("PRACTICE_NAME", &mut config.practice.name);
    env_string("PRACTICE_PHONE", &mut config.practice.phone);
    env_string("PRACTICE_TIMEZONE", &mut config.practice.timezone);
    env_string("PRACTICE_HOURS", &mut config.practice.hours);
    env_string("PRACTICE_ADDRESS", &mut config.practice.address);

    env_string("AGENT_NAME", &mut config.agent.name);

    if let Ok(host) = std::env::var("FRONTDESK_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("FRONTDESK_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    env_string("FRONTDESK_LOG_LEVEL", &mut config.logging.level);
    if let Ok(json) = std::env::var("FRONTDESK_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}
