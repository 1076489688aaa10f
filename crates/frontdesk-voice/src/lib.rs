//! LiveKit integration for the front desk worker.
//!
//! Covers the transport side of a call: room management and join
//! tokens via the Room Service, call recording via the Egress service,
//! and the session blueprint (STT/LLM/TTS resolution) handed to the
//! media pipeline.
//!
//! The media pipeline itself (VAD, streaming STT, LLM turns, TTS
//! playback) runs in the hosted agent runtime; this crate only decides
//! its settings and drives the server-side services around it.

pub mod config;
pub mod egress;
pub mod error;
pub mod service;
pub mod session;

pub use config::{LiveKitConfig, S3Target};
pub use egress::EgressClient;
pub use error::VoiceError;
pub use service::VoiceService;
pub use session::{
    resolve_tts, voice_catalog, LlmOptions, SessionOptions, SttOptions, TtsAvailability,
    TtsOptions,
};
