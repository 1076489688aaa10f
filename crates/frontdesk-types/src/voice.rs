//! Voice provider and catalog definitions.
//!
//! A `VoiceOption` maps a logical voice id to a specific TTS provider
//! voice/model plus a human-readable label shown in the practice
//! dashboard.

use serde::{Deserialize, Serialize};

/// Supported TTS providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    /// Deepgram Aura (low latency, hosted).
    #[default]
    Deepgram,
    /// ElevenLabs (high fidelity, hosted).
    Elevenlabs,
    /// Cartesia Sonic (hosted).
    Cartesia,
}

impl TtsProvider {
    /// Returns the canonical string label for this provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deepgram => "deepgram",
            Self::Elevenlabs => "elevenlabs",
            Self::Cartesia => "cartesia",
        }
    }
}

impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = ParseTtsProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deepgram" => Ok(Self::Deepgram),
            "elevenlabs" => Ok(Self::Elevenlabs),
            "cartesia" => Ok(Self::Cartesia),
            _ => Err(ParseTtsProviderError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown TTS provider string.
#[derive(Debug, Clone)]
pub struct ParseTtsProviderError(pub String);

impl std::fmt::Display for ParseTtsProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown tts provider: {}", self.0)
    }
}

impl std::error::Error for ParseTtsProviderError {}

/// A selectable voice in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceOption {
    /// Logical id, e.g. "thalia" or "aria".
    pub id: String,
    /// The provider that serves this voice.
    pub provider: TtsProvider,
    /// Provider-specific voice id or model name, e.g.
    /// "aura-2-thalia-en" (Deepgram) or "9BWtsMINqrJLrRacOk9x"
    /// (ElevenLabs).
    pub voice_id: String,
    /// Human-readable label, e.g. "Thalia (Natural Female)".
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse_round_trip() {
        for provider in [
            TtsProvider::Deepgram,
            TtsProvider::Elevenlabs,
            TtsProvider::Cartesia,
        ] {
            let parsed: TtsProvider = provider.as_str().parse().unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn provider_parse_is_case_insensitive() {
        let parsed: TtsProvider = "ElevenLabs".parse().unwrap();
        assert_eq!(parsed, TtsProvider::Elevenlabs);
    }

    #[test]
    fn provider_parse_rejects_unknown() {
        assert!("kokoro-web".parse::<TtsProvider>().is_err());
    }

    #[test]
    fn provider_serde_uses_lowercase() {
        let json = serde_json::to_string(&TtsProvider::Elevenlabs).unwrap();
        assert_eq!(json, r#""elevenlabs""#);
        let back: TtsProvider = serde_json::from_str(r#""deepgram""#).unwrap();
        assert_eq!(back, TtsProvider::Deepgram);
    }
}
