//! Call lifecycle: practice resolution, session wiring, and teardown.
//!
//! A dispatched call arrives with SIP participant attributes. The
//! worker resolves which practice the caller dialed, prepares the
//! session blueprint (system prompt, greeting, STT/LLM/TTS settings),
//! starts recording, then consumes session events until the caller
//! hangs up. Teardown stops the recording and delivers the post-call
//! report.
//!
//! Every resolution step degrades silently: an unreachable platform or
//! unknown number means the call runs against the env-default practice
//! rather than failing.

use crate::call_log::CallLog;
use crate::tools::Tools;
use chrono::Utc;
use frontdesk_config::Config;
use frontdesk_platform::{PlatformClient, PracticeQuery};
use frontdesk_prompts::{build_system_prompt, greeting_instruction, practice_now};
use frontdesk_types::{CallReport, PracticeConfig};
use frontdesk_voice::{
    EgressClient, LiveKitConfig, S3Target, SessionOptions, TtsAvailability, VoiceService,
};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long to wait for the recording upload to finish after the call.
const RECORDING_FINALIZE_TIMEOUT: Duration = Duration::from_secs(60);

/// Who produced a conversation item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Caller,
    Agent,
}

/// Events emitted by the media runtime while a call is live.
#[derive(Debug)]
pub enum SessionEvent {
    /// A finalized speech turn (STT transcript or LLM output).
    ConversationItem { speaker: Speaker, text: String },
    /// The LLM invoked a tool.
    ToolInvoked { name: String, args: Value },
    /// The caller hung up or the room closed.
    Disconnected,
}

/// SIP attributes relevant to routing, extracted from the dispatched
/// participant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallAttributes {
    pub practice_id: String,
    /// Calling number.
    pub from: String,
    /// Called number.
    pub to: String,
}

/// Extracts routing attributes. Dispatch rules differ in which key they
/// populate, so each field checks its known aliases in order.
pub fn call_attributes(attrs: &HashMap<String, String>) -> CallAttributes {
    let get = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| attrs.get(*k))
            .cloned()
            .unwrap_or_default()
    };
    CallAttributes {
        practice_id: get(&["practice_id", "sip.practice_id"]),
        from: get(&["sip.callingNumber", "sip.from"]),
        to: get(&["sip.calledNumber", "sip.to"]),
    }
}

/// Everything the media runtime needs to open a session for one call.
#[derive(Debug)]
pub struct SessionBlueprint {
    pub system_prompt: String,
    pub greeting: String,
    pub options: SessionOptions,
}

/// The long-lived worker: shared clients plus per-call orchestration.
pub struct Worker {
    config: Config,
    platform: PlatformClient,
    voice: VoiceService,
    egress: EgressClient,
}

impl Worker {
    pub fn new(config: Config) -> Self {
        let platform = PlatformClient::new(&config.platform.api_url, &config.platform.api_key);
        let livekit = LiveKitConfig::new(
            &config.livekit.url,
            &config.livekit.api_key,
            &config.livekit.api_secret,
        );
        let egress = EgressClient::new(
            &livekit,
            S3Target {
                bucket: config.recording.s3_bucket.clone(),
                region: config.recording.s3_region.clone(),
                access_key: config.recording.s3_access_key.clone(),
                secret_key: config.recording.s3_secret_key.clone(),
                endpoint: config.recording.s3_endpoint.clone(),
            },
        );
        let voice = VoiceService::new(livekit);
        Self {
            config,
            platform,
            voice,
            egress,
        }
    }

    pub fn voice(&self) -> &VoiceService {
        &self.voice
    }

    pub fn platform(&self) -> &PlatformClient {
        &self.platform
    }

    /// Resolves the practice for a call: by dispatch practice id first,
    /// then by the called number, finally the env-default practice.
    pub async fn resolve_practice(&self, attrs: &CallAttributes) -> PracticeConfig {
        let defaults = self.config.default_practice();

        if !attrs.practice_id.is_empty() {
            tracing::info!(practice_id = %attrs.practice_id, "fetching practice config");
            match self
                .platform
                .fetch_practice_config(PracticeQuery::Id(&attrs.practice_id), &defaults)
                .await
            {
                Ok(practice) => return practice,
                Err(e) => {
                    tracing::error!(practice_id = %attrs.practice_id, error = %e, "practice fetch failed, using env fallback");
                    return defaults;
                }
            }
        }

        if !attrs.to.is_empty() {
            tracing::info!(phone = %attrs.to, "resolving practice by phone number");
            match self
                .platform
                .fetch_practice_config(PracticeQuery::PhoneNumber(&attrs.to), &defaults)
                .await
            {
                Ok(practice) => return practice,
                Err(e) => {
                    tracing::error!(phone = %attrs.to, error = %e, "phone resolution failed, using env fallback");
                    return defaults;
                }
            }
        }

        tracing::info!("no practice id in dispatch attributes, using env fallback");
        defaults
    }

    /// Builds the session blueprint for a resolved practice.
    pub fn prepare_session(&self, practice: &PracticeConfig) -> SessionBlueprint {
        let now = practice_now(practice, Utc::now());
        SessionBlueprint {
            system_prompt: build_system_prompt(practice, None, now),
            greeting: greeting_instruction(practice),
            options: SessionOptions::for_call(
                practice,
                &self.config.anthropic.model,
                TtsAvailability {
                    elevenlabs: !self.config.tts.elevenlabs_api_key.is_empty(),
                    cartesia: !self.config.tts.cartesia_api_key.is_empty(),
                },
            ),
        }
    }

    /// Runs one call to completion: consumes session events, executes
    /// tools, and delivers the post-call report. Returns the report
    /// that was sent.
    pub async fn handle_call(
        &self,
        room_name: &str,
        attributes: &HashMap<String, String>,
        mut events: mpsc::Receiver<SessionEvent>,
    ) -> CallReport {
        let attrs = call_attributes(attributes);
        let practice = self.resolve_practice(&attrs).await;
        tracing::info!(
            practice = %practice.practice_name,
            practice_id = %practice.practice_id,
            "practice resolved"
        );

        let mut log = CallLog::new(&attrs.from, &attrs.to, &practice.practice_id, &practice.agent_name);
        tracing::info!(
            call_id = %log.call_id(),
            room = room_name,
            from = %attrs.from,
            to = %attrs.to,
            "call started"
        );

        let egress_id = self.start_recording(room_name, &practice, &mut log).await;

        let tools = Tools::new(&self.platform, &practice.practice_id);
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::ConversationItem { speaker, text } => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    match speaker {
                        Speaker::Caller => log.log_caller_speech(&text),
                        Speaker::Agent => log.log_agent_speech(&text),
                    }
                }
                SessionEvent::ToolInvoked { name, args } => {
                    let result = tools.execute(&name, &args).await;
                    log.log_tool_call(&name, args, &result);
                }
                SessionEvent::Disconnected => {
                    tracing::info!(call_id = %log.call_id(), "participant disconnected");
                    break;
                }
            }
        }

        if let Some(egress_id) = egress_id {
            if let Err(e) = self.egress.stop(&egress_id).await {
                tracing::warn!(call_id = %log.call_id(), error = %e, "recording stop failed");
            }
            self.egress
                .wait_for_completion(&egress_id, RECORDING_FINALIZE_TIMEOUT)
                .await;
        }

        log.log_call_end("caller_disconnected");
        let report = log.into_report();
        self.platform.send_call_report(&report).await;
        tracing::info!(call_id = %report.call_id, "call ended, report sent");
        report
    }

    async fn start_recording(
        &self,
        room_name: &str,
        practice: &PracticeConfig,
        log: &mut CallLog,
    ) -> Option<String> {
        if !self.egress.is_enabled() {
            tracing::info!(call_id = %log.call_id(), "no recording bucket configured, skipping recording");
            return None;
        }

        match self
            .egress
            .start_room_recording(room_name, &practice.practice_id, log.call_id())
            .await
        {
            Ok(egress_id) => {
                let url = self
                    .egress
                    .recording_url(&practice.practice_id, log.call_id());
                log.set_recording_url(url);
                Some(egress_id)
            }
            Err(e) => {
                tracing::warn!(call_id = %log.call_id(), error = %e, "recording start failed (non-fatal)");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn attributes_prefer_explicit_practice_id() {
        let parsed = call_attributes(&attrs(&[
            ("practice_id", "prc_7"),
            ("sip.practice_id", "prc_other"),
            ("sip.callingNumber", "+15550001111"),
            ("sip.calledNumber", "+15552223333"),
        ]));
        assert_eq!(parsed.practice_id, "prc_7");
        assert_eq!(parsed.from, "+15550001111");
        assert_eq!(parsed.to, "+15552223333");
    }

    #[test]
    fn attributes_fall_back_to_sip_aliases() {
        let parsed = call_attributes(&attrs(&[
            ("sip.practice_id", "prc_9"),
            ("sip.from", "+15550001111"),
            ("sip.to", "+15552223333"),
        ]));
        assert_eq!(parsed.practice_id, "prc_9");
        assert_eq!(parsed.from, "+15550001111");
        assert_eq!(parsed.to, "+15552223333");
    }

    #[test]
    fn attributes_default_to_empty() {
        assert_eq!(call_attributes(&HashMap::new()), CallAttributes::default());
    }

    #[test]
    fn blueprint_carries_prompt_greeting_and_options() {
        let config = Config::default();
        let worker = Worker::new(config.clone());
        let practice = config.default_practice();

        let blueprint = worker.prepare_session(&practice);
        assert!(blueprint.system_prompt.contains(&practice.practice_name));
        assert!(blueprint.greeting.contains("Thank you for calling"));
        assert_eq!(blueprint.options.stt.model, "nova-2");
        assert_eq!(blueprint.options.llm.model, config.anthropic.model);
    }
}
