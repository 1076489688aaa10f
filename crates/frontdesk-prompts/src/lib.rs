//! System prompt construction for the dental receptionist voice agent.
//!
//! The prompt is the product here: it defines the persona, the practice
//! facts, how tools are used, the per-scenario playbooks, and the hard
//! guardrails. Everything is rendered from `PracticeConfig` plus an
//! injected clock so the output is a pure function of its inputs.

mod dates;
mod sections;

pub use dates::{next_monday, readable_date, time_of_day_greeting, weekday_name};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use frontdesk_types::{CallerInfo, PracticeConfig};

/// Resolves the current time in the practice's timezone.
///
/// Unknown or empty timezone names fall back to UTC rather than failing
/// the call.
pub fn practice_now(practice: &PracticeConfig, now_utc: DateTime<Utc>) -> DateTime<Tz> {
    let tz: Tz = match practice.practice_timezone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            if !practice.practice_timezone.is_empty() {
                tracing::warn!(
                    timezone = %practice.practice_timezone,
                    "unknown practice timezone, falling back to UTC"
                );
            }
            chrono_tz::UTC
        }
    };
    now_utc.with_timezone(&tz)
}

/// Builds the complete receptionist system prompt.
///
/// `now` must already be in the practice's timezone (see
/// [`practice_now`]); the prompt quotes it verbatim for all date
/// reasoning the model performs.
pub fn build_system_prompt(
    practice: &PracticeConfig,
    caller_info: Option<&CallerInfo>,
    now: DateTime<Tz>,
) -> String {
    let mut prompt = String::with_capacity(16 * 1024);

    prompt.push_str(&sections::identity(practice, now));
    prompt.push_str(&sections::practice_details(practice));
    if let Some(info) = caller_info {
        prompt.push_str(&sections::caller_context(info));
    }
    prompt.push_str(&sections::capabilities());
    prompt.push_str(&sections::playbooks(practice, now));
    prompt.push_str(&sections::emotional_intelligence());
    prompt.push_str(&sections::guardrails(practice));
    prompt.push_str(&sections::scheduling_logic(practice, now));
    prompt.push_str(&sections::small_talk());
    prompt.push_str(&sections::edge_cases());
    prompt.push_str(&sections::output_rules());

    prompt
}

/// Builds the instruction used to generate the opening greeting when
/// the agent enters the call.
pub fn greeting_instruction(practice: &PracticeConfig) -> String {
    format!(
        "Greet the caller warmly. Say: Thank you for calling {}, this is {}, \
         how can I help you today?",
        practice.practice_name, practice.agent_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use frontdesk_types::{ProviderInfo, TtsProvider};

    fn test_practice() -> PracticeConfig {
        PracticeConfig {
            practice_id: "prc_1".to_string(),
            practice_name: "Rivera Dental Care".to_string(),
            practice_phone: "(555) 867-5309".to_string(),
            practice_timezone: "America/Chicago".to_string(),
            practice_hours: "Mon-Fri 8am-5pm".to_string(),
            practice_address: "742 Evergreen Terrace, Austin, TX 78701".to_string(),
            practice_website: None,
            emergency_info: None,
            agent_name: "Relay".to_string(),
            tts_provider: TtsProvider::Deepgram,
            tts_voice_id: String::new(),
            knowledge_base: String::new(),
            providers: Vec::new(),
            services: Vec::new(),
            operating_hours: Vec::new(),
        }
    }

    fn test_now() -> DateTime<Tz> {
        // A Wednesday morning.
        chrono_tz::America::Chicago
            .with_ymd_and_hms(2026, 2, 25, 9, 30, 0)
            .unwrap()
    }

    #[test]
    fn prompt_contains_identity_and_practice_facts() {
        let prompt = build_system_prompt(&test_practice(), None, test_now());
        assert!(prompt.contains("You are Relay"));
        assert!(prompt.contains("Rivera Dental Care"));
        assert!(prompt.contains("(555) 867-5309"));
        assert!(prompt.contains("742 Evergreen Terrace"));
        assert!(prompt.contains("Wednesday, February 25, 2026"));
        assert!(prompt.contains("America/Chicago"));
    }

    #[test]
    fn prompt_quotes_date_calculations() {
        let prompt = build_system_prompt(&test_practice(), None, test_now());
        // Tomorrow and next Monday relative to Wed 2026-02-25.
        assert!(prompt.contains("Thursday, February 26, 2026"));
        assert!(prompt.contains("2026-03-02"));
    }

    #[test]
    fn optional_sections_omitted_when_empty() {
        let prompt = build_system_prompt(&test_practice(), None, test_now());
        assert!(!prompt.contains("## Practice Knowledge Base"));
        assert!(!prompt.contains("## Providers"));
        assert!(!prompt.contains("## Services Offered"));
        assert!(!prompt.contains("## Caller Context"));
    }

    #[test]
    fn optional_sections_render_when_present() {
        let mut practice = test_practice();
        practice.knowledge_base = "We offer free parking behind the building.".to_string();
        practice.providers = vec![ProviderInfo {
            name: "Dr. Smith".to_string(),
            title: Some("DDS".to_string()),
            specialties: Some("General Dentistry".to_string()),
        }];
        practice.services = vec!["Cleanings".to_string(), "Implants".to_string()];

        let caller = CallerInfo {
            phone_number: "+15551234567".to_string(),
            is_known_patient: Some(true),
            patient_name: Some("Maria Lopez".to_string()),
            ..Default::default()
        };

        let prompt = build_system_prompt(&practice, Some(&caller), test_now());
        assert!(prompt.contains("## Practice Knowledge Base"));
        assert!(prompt.contains("free parking"));
        assert!(prompt.contains("- Dr. Smith (DDS) — General Dentistry"));
        assert!(prompt.contains("- Implants"));
        assert!(prompt.contains("## Caller Context"));
        assert!(prompt.contains("Maria Lopez"));
    }

    #[test]
    fn greeting_names_practice_and_agent() {
        let greeting = greeting_instruction(&test_practice());
        assert!(greeting.contains("Rivera Dental Care"));
        assert!(greeting.contains("this is Relay"));
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let mut practice = test_practice();
        practice.practice_timezone = "Mars/Olympus_Mons".to_string();
        let now = practice_now(&practice, Utc.with_ymd_and_hms(2026, 2, 25, 15, 0, 0).unwrap());
        assert_eq!(now.timezone(), chrono_tz::UTC);
    }

    #[test]
    fn practice_timezone_is_applied() {
        let practice = test_practice();
        let now = practice_now(&practice, Utc.with_ymd_and_hms(2026, 2, 25, 15, 0, 0).unwrap());
        // 15:00 UTC is 09:00 in Chicago (CST).
        assert_eq!(now.format("%H:%M").to_string(), "09:00");
    }
}
