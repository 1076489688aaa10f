//! Call transcript events and the post-call report payload.
//!
//! Every call produces an ordered event list (speech turns, tool calls,
//! call end) that is rendered into a human-readable transcript and sent
//! to the platform webhook when the call completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured payloads for each call event type.
///
/// Serialised with an internal `type` tag so the webhook payload carries
/// self-describing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallEventKind {
    /// The caller said something (final STT transcript).
    CallerSpeech { text: String },
    /// The agent said something (LLM output sent to TTS).
    AgentSpeech { text: String },
    /// The LLM invoked a tool and received a result.
    ToolCall {
        tool: String,
        args: serde_json::Value,
        /// Result text, truncated at record time.
        result: String,
    },
    /// The call ended.
    CallEnd { reason: String },
}

impl CallEventKind {
    /// Returns the canonical event type string for this payload.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CallerSpeech { .. } => "caller_speech",
            Self::AgentSpeech { .. } => "agent_speech",
            Self::ToolCall { .. } => "tool_call",
            Self::CallEnd { .. } => "call_end",
        }
    }
}

/// A single timestamped entry in a call's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: CallEventKind,
}

/// A recorded tool invocation, kept separately from the event list so
/// the platform can process tool outcomes without replaying events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub args: serde_json::Value,
    pub result: String,
}

/// Structured details captured over the course of a call, primarily
/// from `book_appointment` tool arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectedInfo {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: String,
    #[serde(default)]
    pub procedure_type: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_time: String,
}

impl CollectedInfo {
    /// True when nothing was captured during the call.
    pub fn is_empty(&self) -> bool {
        self.patient_name.is_empty()
            && self.patient_phone.is_empty()
            && self.patient_email.is_empty()
            && self.procedure_type.is_empty()
            && self.appointment_date.is_empty()
            && self.appointment_time.is_empty()
    }
}

/// The full post-call payload sent to the platform webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallReport {
    /// Fixed source marker so the platform can route the payload.
    pub source: String,
    pub call_id: String,
    /// Calling number (E.164), empty when unknown.
    pub from: String,
    /// Called number (E.164), empty when unknown.
    pub to: String,
    /// Practice the call was routed to. Empty for env-default configs.
    pub practice_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Terminal call status, currently always "completed".
    pub status: String,
    /// Human-readable transcript rendered from the event list.
    pub transcript: String,
    /// Public URL of the call recording, when recording was enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    pub collected_info: CollectedInfo,
    pub tool_calls: Vec<ToolCallRecord>,
    pub events: Vec<CallEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_kind_serializes_with_type_tag() {
        let event = CallEvent {
            timestamp: Utc::now(),
            kind: CallEventKind::CallerSpeech {
                text: "I'd like to book a cleaning".to_string(),
            },
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "caller_speech");
        assert_eq!(value["text"], "I'd like to book a cleaning");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn event_types_match_tags() {
        let kinds = [
            CallEventKind::CallerSpeech {
                text: String::new(),
            },
            CallEventKind::AgentSpeech {
                text: String::new(),
            },
            CallEventKind::ToolCall {
                tool: "send_sms".to_string(),
                args: json!({}),
                result: String::new(),
            },
            CallEventKind::CallEnd {
                reason: "caller_disconnected".to_string(),
            },
        ];
        for kind in kinds {
            let value = serde_json::to_value(&kind).unwrap();
            assert_eq!(value["type"], kind.event_type());
        }
    }

    #[test]
    fn collected_info_empty_detection() {
        let mut info = CollectedInfo::default();
        assert!(info.is_empty());
        info.patient_name = "Maria Lopez".to_string();
        assert!(!info.is_empty());
    }

    #[test]
    fn report_omits_missing_recording_url() {
        let report = CallReport {
            source: "frontdesk-voice-engine".to_string(),
            call_id: "c-1".to_string(),
            from: String::new(),
            to: String::new(),
            practice_id: String::new(),
            started_at: Utc::now(),
            ended_at: Utc::now(),
            status: "completed".to_string(),
            transcript: String::new(),
            recording_url: None,
            collected_info: CollectedInfo::default(),
            tool_calls: vec![],
            events: vec![],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("recording_url").is_none());
    }
}
