//! Practice (tenant) configuration types.
//!
//! A practice is a dental office whose configuration customizes the
//! agent's persona and behavior: display name, contact details, hours,
//! voice preference, and the knowledge base fed into the system prompt.

use crate::voice::TtsProvider;
use serde::{Deserialize, Serialize};

/// A practice's resolved configuration.
///
/// Produced either from the platform's practice-config endpoint or from
/// environment defaults when the platform is unreachable. Fields missing
/// in a platform response fall back per-field to the defaults, so every
/// field here is always populated (optionals are genuinely optional
/// practice data, not fetch artifacts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Platform identifier for the practice. Empty when running purely
    /// from environment defaults.
    #[serde(default)]
    pub practice_id: String,
    /// Display name spoken in greetings ("Thank you for calling …").
    pub practice_name: String,
    /// Public phone number of the practice.
    #[serde(default)]
    pub practice_phone: String,
    /// IANA timezone name, e.g. `America/Chicago`. Drives all date and
    /// time rendering in the system prompt.
    #[serde(default)]
    pub practice_timezone: String,
    /// Human-readable operating hours, e.g. "Mon-Fri 8am-5pm".
    #[serde(default)]
    pub practice_hours: String,
    /// Street address.
    #[serde(default)]
    pub practice_address: String,
    /// Practice website, if any.
    #[serde(default)]
    pub practice_website: Option<String>,
    /// After-hours emergency guidance, if the practice provides one.
    #[serde(default)]
    pub emergency_info: Option<String>,
    /// The receptionist persona's name.
    pub agent_name: String,
    /// Preferred TTS provider for this practice.
    #[serde(default)]
    pub tts_provider: TtsProvider,
    /// Provider-specific voice id or model name. Empty means "use the
    /// provider default".
    #[serde(default)]
    pub tts_voice_id: String,
    /// Free-form knowledge base text gathered from the practice's
    /// website and configuration. Injected verbatim into the prompt.
    #[serde(default)]
    pub knowledge_base: String,
    /// Clinical provider roster.
    #[serde(default)]
    pub providers: Vec<ProviderInfo>,
    /// Services offered, as short labels.
    #[serde(default)]
    pub services: Vec<String>,
    /// Structured operating hours, one entry per open day.
    #[serde(default)]
    pub operating_hours: Vec<OperatingHours>,
}

/// A clinical provider (dentist/hygienist) listed in the prompt roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Comma-separated specialties, e.g. "Orthodontics, Implants".
    #[serde(default)]
    pub specialties: Option<String>,
}

/// Structured opening hours for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Day name, e.g. "Monday".
    pub day: String,
    /// Opening time, e.g. "8:00 AM".
    pub open: String,
    /// Closing time, e.g. "5:00 PM".
    pub close: String,
}

/// Caller context resolved from caller ID / the phone system, injected
/// into the prompt when a known patient calls in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallerInfo {
    /// The caller's phone number in E.164 form.
    #[serde(default)]
    pub phone_number: String,
    /// Whether the number matched an existing patient record.
    #[serde(default)]
    pub is_known_patient: Option<bool>,
    /// Matched patient name, if any.
    #[serde(default)]
    pub patient_name: Option<String>,
    /// Date of the patient's last visit.
    #[serde(default)]
    pub last_visit: Option<String>,
    /// Summary of upcoming appointments.
    #[serde(default)]
    pub upcoming_appointments: Option<String>,
    /// The provider the patient usually sees.
    #[serde(default)]
    pub preferred_provider: Option<String>,
}
