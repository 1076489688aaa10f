use crate::error::PlatformError;
use frontdesk_types::{CallReport, OperatingHours, PracticeConfig, ProviderInfo, TtsProvider};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Timeout for practice-config fetches. Resolution happens while the
/// caller waits for the greeting, so this stays short.
const CONFIG_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for tool action dispatch.
const ACTION_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for post-call webhook delivery.
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker sent in the `X-Engine-Source` header and report payload so
/// the platform can attribute inbound traffic.
pub const ENGINE_SOURCE: &str = "frontdesk-voice-engine";

/// How to look up a practice on the platform.
#[derive(Debug, Clone, Copy)]
pub enum PracticeQuery<'a> {
    /// By platform practice id (from SIP dispatch attributes).
    Id(&'a str),
    /// By the number the caller dialed.
    PhoneNumber(&'a str),
}

/// Client for the backend platform API.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

/// Practice-config response with every field optional; absent fields
/// fall back per-field to the env defaults at merge time.
#[derive(Debug, Deserialize)]
struct RawPracticeConfig {
    practice_id: Option<String>,
    practice_name: Option<String>,
    practice_phone: Option<String>,
    practice_timezone: Option<String>,
    practice_hours: Option<String>,
    practice_address: Option<String>,
    practice_website: Option<String>,
    emergency_info: Option<String>,
    agent_name: Option<String>,
    tts_provider: Option<TtsProvider>,
    tts_voice_id: Option<String>,
    knowledge_base: Option<String>,
    providers: Option<Vec<ProviderInfo>>,
    services: Option<Vec<String>>,
    operating_hours: Option<Vec<OperatingHours>>,
}

impl PlatformClient {
    /// Creates a client for the given API base URL (e.g.
    /// `https://platform.example.com/api`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http,
        }
    }

    /// Fetches a practice config by id or phone number and merges it
    /// over `defaults` field by field.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failure, non-200 status, or
    /// an undecodable body; the caller is expected to fall back to the
    /// env-default practice config.
    pub async fn fetch_practice_config(
        &self,
        query: PracticeQuery<'_>,
        defaults: &PracticeConfig,
    ) -> Result<PracticeConfig, PlatformError> {
        let url = format!("{}/voice-engine/practice-config", self.base_url);
        let request = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .timeout(CONFIG_FETCH_TIMEOUT);
        let request = match query {
            PracticeQuery::Id(id) => request.query(&[("practice_id", id)]),
            PracticeQuery::PhoneNumber(phone) => request.query(&[("phone_number", phone)]),
        };

        let response = request.send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(PlatformError::Status(status.as_u16()));
        }

        let raw: RawPracticeConfig = response
            .json()
            .await
            .map_err(|e| PlatformError::Decode(e.to_string()))?;

        Ok(merge_practice_config(raw, defaults))
    }

    /// Executes a tool action on the platform.
    ///
    /// Never fails from the tool's point of view: transport errors and
    /// non-JSON responses become `{"success": false, "error": …}`
    /// envelopes so the agent can keep the conversation alive. The
    /// platform signals its own failures inside the returned body.
    pub async fn dispatch_action(&self, action: &str, practice_id: &str, params: Value) -> Value {
        let url = format!("{}/voice-engine/actions", self.base_url);
        let body = json!({
            "action": action,
            "practice_id": practice_id,
            "params": params,
        });

        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(ACTION_TIMEOUT)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(action, error = %e, "platform action call failed");
                return json!({"success": false, "error": e.to_string()});
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if !is_json {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(
                action,
                status = status.as_u16(),
                body = truncate(&text, 200),
                "platform action returned non-JSON response"
            );
            return json!({
                "success": false,
                "error": format!("Non-JSON response (status {})", status.as_u16()),
            });
        }

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(action, error = %e, "platform action response decode failed");
                return json!({"success": false, "error": e.to_string()});
            }
        };

        if status.as_u16() >= 400 {
            tracing::error!(action, status = status.as_u16(), body = %data, "platform action error");
        }

        data
    }

    /// Delivers the post-call report to the platform webhook.
    ///
    /// Failures are logged and swallowed: the call is already over and
    /// there is nothing left to degrade to.
    pub async fn send_call_report(&self, report: &CallReport) {
        let url = format!("{}/webhooks/voice-engine", self.base_url);
        tracing::info!(call_id = %report.call_id, url = %url, "sending post-call report");

        let result = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(WEBHOOK_TIMEOUT)
            .header("X-Engine-Source", ENGINE_SOURCE)
            .json(report)
            .send()
            .await;

        match result {
            Ok(response) if response.status().as_u16() < 300 => {
                tracing::info!(
                    call_id = %report.call_id,
                    status = response.status().as_u16(),
                    "post-call report delivered"
                );
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    call_id = %report.call_id,
                    status,
                    body = truncate(&body, 300),
                    "post-call webhook rejected report"
                );
            }
            Err(e) => {
                tracing::error!(call_id = %report.call_id, error = %e, "post-call webhook delivery failed");
            }
        }
    }
}

/// Truncates to at most `max` characters.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn merge_practice_config(raw: RawPracticeConfig, defaults: &PracticeConfig) -> PracticeConfig {
    PracticeConfig {
        practice_id: raw
            .practice_id
            .unwrap_or_else(|| defaults.practice_id.clone()),
        practice_name: raw
            .practice_name
            .unwrap_or_else(|| defaults.practice_name.clone()),
        practice_phone: raw
            .practice_phone
            .unwrap_or_else(|| defaults.practice_phone.clone()),
        practice_timezone: raw
            .practice_timezone
            .unwrap_or_else(|| defaults.practice_timezone.clone()),
        practice_hours: raw
            .practice_hours
            .unwrap_or_else(|| defaults.practice_hours.clone()),
        practice_address: raw
            .practice_address
            .unwrap_or_else(|| defaults.practice_address.clone()),
        practice_website: raw.practice_website.or_else(|| defaults.practice_website.clone()),
        emergency_info: raw.emergency_info.or_else(|| defaults.emergency_info.clone()),
        agent_name: raw.agent_name.unwrap_or_else(|| defaults.agent_name.clone()),
        tts_provider: raw.tts_provider.unwrap_or(defaults.tts_provider),
        tts_voice_id: raw
            .tts_voice_id
            .unwrap_or_else(|| defaults.tts_voice_id.clone()),
        knowledge_base: raw
            .knowledge_base
            .unwrap_or_else(|| defaults.knowledge_base.clone()),
        providers: raw.providers.unwrap_or_else(|| defaults.providers.clone()),
        services: raw.services.unwrap_or_else(|| defaults.services.clone()),
        operating_hours: raw
            .operating_hours
            .unwrap_or_else(|| defaults.operating_hours.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> PracticeConfig {
        PracticeConfig {
            practice_id: String::new(),
            practice_name: "Rivera Dental Care".to_string(),
            practice_phone: "(555) 867-5309".to_string(),
            practice_timezone: "America/Chicago".to_string(),
            practice_hours: "Mon-Fri 8am-5pm".to_string(),
            practice_address: "742 Evergreen Terrace".to_string(),
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

    #[test]
    fn merge_prefers_platform_fields() {
        let raw: RawPracticeConfig = serde_json::from_value(json!({
            "practice_id": "prc_9",
            "practice_name": "Lakeside Dental",
            "tts_provider": "elevenlabs",
        }))
        .unwrap();

        let merged = merge_practice_config(raw, &defaults());
        assert_eq!(merged.practice_id, "prc_9");
        assert_eq!(merged.practice_name, "Lakeside Dental");
        assert_eq!(merged.tts_provider, TtsProvider::Elevenlabs);
        // Missing fields fall back to defaults.
        assert_eq!(merged.practice_phone, "(555) 867-5309");
        assert_eq!(merged.agent_name, "Relay");
    }

    #[test]
    fn merge_with_empty_payload_reproduces_defaults() {
        let raw: RawPracticeConfig = serde_json::from_value(json!({})).unwrap();
        let merged = merge_practice_config(raw, &defaults());
        assert_eq!(merged, defaults());
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 3), "hel");
        // "é" is two bytes but one character.
        assert_eq!(truncate("éé", 1), "é");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PlatformClient::new("https://platform.example.com/api/", "key");
        assert_eq!(client.base_url, "https://platform.example.com/api");
    }
}
