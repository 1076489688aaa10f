//! Session blueprint: which STT, LLM, and TTS settings a call runs with.
//!
//! The hosted runtime actually opens the media pipeline; the worker's
//! job is to resolve the practice's voice preference against what is
//! configured, falling back to Deepgram Aura when a premium provider is
//! requested without credentials.

use frontdesk_types::{PracticeConfig, TtsProvider, VoiceOption};
use serde::Serialize;

pub const STT_MODEL: &str = "nova-2";
pub const STT_LANGUAGE: &str = "en";

pub const ELEVENLABS_TTS_MODEL: &str = "eleven_flash_v2_5";
pub const CARTESIA_TTS_MODEL: &str = "sonic-2";

const DEFAULT_DEEPGRAM_VOICE: &str = "aura-2-thalia-en";
const DEFAULT_ELEVENLABS_VOICE: &str = "9BWtsMINqrJLrRacOk9x";

/// Which premium TTS providers have credentials configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TtsAvailability {
    pub elevenlabs: bool,
    pub cartesia: bool,
}

/// Speech-to-text settings for a call.
#[derive(Debug, Clone, Serialize)]
pub struct SttOptions {
    pub model: String,
    pub language: String,
}

/// LLM settings for a call.
#[derive(Debug, Clone, Serialize)]
pub struct LlmOptions {
    pub model: String,
}

/// Resolved text-to-speech settings for a call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TtsOptions {
    pub provider: TtsProvider,
    /// Synthesis model. For Deepgram Aura the voice id doubles as the
    /// model name.
    pub model: String,
    pub voice_id: String,
}

/// Everything the media pipeline needs to serve one call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOptions {
    pub stt: SttOptions,
    pub llm: LlmOptions,
    pub tts: TtsOptions,
}

impl SessionOptions {
    /// Builds session options for a call to the given practice.
    pub fn for_call(
        practice: &PracticeConfig,
        llm_model: &str,
        availability: TtsAvailability,
    ) -> Self {
        Self {
            stt: SttOptions {
                model: STT_MODEL.to_string(),
                language: STT_LANGUAGE.to_string(),
            },
            llm: LlmOptions {
                model: llm_model.to_string(),
            },
            tts: resolve_tts(practice, availability),
        }
    }
}

/// Resolves the practice's TTS preference against configured providers.
///
/// A premium provider is used only when its credentials are present;
/// otherwise the call falls back to Deepgram Aura. Unknown Deepgram
/// voice ids also fall back to the default voice rather than failing
/// the call.
pub fn resolve_tts(practice: &PracticeConfig, availability: TtsAvailability) -> TtsOptions {
    match practice.tts_provider {
        TtsProvider::Elevenlabs if availability.elevenlabs => {
            let voice_id = if practice.tts_voice_id.is_empty() {
                DEFAULT_ELEVENLABS_VOICE.to_string()
            } else {
                practice.tts_voice_id.clone()
            };
            tracing::info!(voice = %voice_id, "using ElevenLabs TTS");
            TtsOptions {
                provider: TtsProvider::Elevenlabs,
                model: ELEVENLABS_TTS_MODEL.to_string(),
                voice_id,
            }
        }
        TtsProvider::Cartesia if availability.cartesia => {
            tracing::info!(voice = %practice.tts_voice_id, "using Cartesia TTS");
            TtsOptions {
                provider: TtsProvider::Cartesia,
                model: CARTESIA_TTS_MODEL.to_string(),
                voice_id: practice.tts_voice_id.clone(),
            }
        }
        requested => {
            if requested != TtsProvider::Deepgram {
                tracing::warn!(
                    requested = %requested,
                    "requested TTS provider not configured, falling back to Deepgram"
                );
            }
            let voice_id = deepgram_voice(&practice.tts_voice_id);
            tracing::info!(voice = %voice_id, "using Deepgram TTS");
            TtsOptions {
                provider: TtsProvider::Deepgram,
                model: voice_id.clone(),
                voice_id,
            }
        }
    }
}

fn deepgram_voice(requested: &str) -> String {
    let known = voice_catalog()
        .into_iter()
        .filter(|v| v.provider == TtsProvider::Deepgram)
        .any(|v| v.voice_id == requested);
    if known {
        requested.to_string()
    } else {
        if !requested.is_empty() {
            tracing::warn!(requested, "unknown Deepgram voice, using default");
        }
        DEFAULT_DEEPGRAM_VOICE.to_string()
    }
}

/// The selectable voice catalog shown in the practice dashboard.
pub fn voice_catalog() -> Vec<VoiceOption> {
    fn voice(id: &str, provider: TtsProvider, voice_id: &str, label: &str) -> VoiceOption {
        VoiceOption {
            id: id.to_string(),
            provider,
            voice_id: voice_id.to_string(),
            label: label.to_string(),
        }
    }

    vec![
        voice(
            "thalia",
            TtsProvider::Deepgram,
            "aura-2-thalia-en",
            "Thalia (Natural Female)",
        ),
        voice(
            "luna",
            TtsProvider::Deepgram,
            "aura-2-luna-en",
            "Luna (Warm Female)",
        ),
        voice(
            "aria",
            TtsProvider::Elevenlabs,
            "9BWtsMINqrJLrRacOk9x",
            "Aria (Professional Female)",
        ),
        voice(
            "sarah",
            TtsProvider::Elevenlabs,
            "EXAVITQu4vr4xnSDxMaL",
            "Sarah (Friendly Female)",
        ),
        voice(
            "charlotte",
            TtsProvider::Elevenlabs,
            "XB0fDUnXU5powFXDhCwa",
            "Charlotte (Elegant Female)",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn practice(provider: TtsProvider, voice_id: &str) -> PracticeConfig {
        PracticeConfig {
            practice_id: "prc_7".to_string(),
            practice_name: "Rivera Dental Care".to_string(),
            practice_phone: "(555) 867-5309".to_string(),
            practice_timezone: "America/Chicago".to_string(),
            practice_hours: "Mon-Fri 8am-5pm".to_string(),
            practice_address: "742 Evergreen Terrace".to_string(),
            practice_website: None,
            emergency_info: None,
            agent_name: "Relay".to_string(),
            tts_provider: provider,
            tts_voice_id: voice_id.to_string(),
            knowledge_base: String::new(),
            providers: Vec::new(),
            services: Vec::new(),
            operating_hours: Vec::new(),
        }
    }

    #[test]
    fn elevenlabs_with_credentials_and_voice() {
        let availability = TtsAvailability {
            elevenlabs: true,
            cartesia: false,
        };
        let tts = resolve_tts(
            &practice(TtsProvider::Elevenlabs, "EXAVITQu4vr4xnSDxMaL"),
            availability,
        );
        assert_eq!(tts.provider, TtsProvider::Elevenlabs);
        assert_eq!(tts.model, ELEVENLABS_TTS_MODEL);
        assert_eq!(tts.voice_id, "EXAVITQu4vr4xnSDxMaL");
    }

    #[test]
    fn elevenlabs_without_voice_uses_default_aria() {
        let availability = TtsAvailability {
            elevenlabs: true,
            cartesia: false,
        };
        let tts = resolve_tts(&practice(TtsProvider::Elevenlabs, ""), availability);
        assert_eq!(tts.voice_id, DEFAULT_ELEVENLABS_VOICE);
    }

    #[test]
    fn elevenlabs_without_credentials_falls_back_to_deepgram() {
        let tts = resolve_tts(
            &practice(TtsProvider::Elevenlabs, "EXAVITQu4vr4xnSDxMaL"),
            TtsAvailability::default(),
        );
        assert_eq!(tts.provider, TtsProvider::Deepgram);
        assert_eq!(tts.voice_id, DEFAULT_DEEPGRAM_VOICE);
    }

    #[test]
    fn known_deepgram_voice_is_kept() {
        let tts = resolve_tts(
            &practice(TtsProvider::Deepgram, "aura-2-luna-en"),
            TtsAvailability::default(),
        );
        assert_eq!(tts.voice_id, "aura-2-luna-en");
        // For Aura the model name is the voice id.
        assert_eq!(tts.model, "aura-2-luna-en");
    }

    #[test]
    fn unknown_deepgram_voice_falls_back_to_default() {
        let tts = resolve_tts(
            &practice(TtsProvider::Deepgram, "aura-2-not-a-voice"),
            TtsAvailability::default(),
        );
        assert_eq!(tts.voice_id, DEFAULT_DEEPGRAM_VOICE);
    }

    #[test]
    fn cartesia_with_credentials() {
        let availability = TtsAvailability {
            elevenlabs: false,
            cartesia: true,
        };
        let tts = resolve_tts(&practice(TtsProvider::Cartesia, "sonic-voice"), availability);
        assert_eq!(tts.provider, TtsProvider::Cartesia);
        assert_eq!(tts.model, CARTESIA_TTS_MODEL);
    }

    #[test]
    fn session_options_carry_stt_and_llm_settings() {
        let options = SessionOptions::for_call(
            &practice(TtsProvider::Deepgram, ""),
            "claude-haiku-4-5",
            TtsAvailability::default(),
        );
        assert_eq!(options.stt.model, "nova-2");
        assert_eq!(options.stt.language, "en");
        assert_eq!(options.llm.model, "claude-haiku-4-5");
        assert_eq!(options.tts.provider, TtsProvider::Deepgram);
    }

    #[test]
    fn catalog_has_voices_for_both_hosted_providers() {
        let catalog = voice_catalog();
        assert!(catalog
            .iter()
            .any(|v| v.provider == TtsProvider::Deepgram && v.id == "thalia"));
        assert!(catalog
            .iter()
            .any(|v| v.provider == TtsProvider::Elevenlabs && v.id == "aria"));
    }
}
