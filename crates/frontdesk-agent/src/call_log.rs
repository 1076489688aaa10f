//! Per-call transcript and event accumulator.
//!
//! Every speech turn, tool call, and the final call end are recorded as
//! timestamped events. When the call finishes the log is rendered into
//! the post-call report for the platform webhook.

use chrono::{DateTime, Utc};
use frontdesk_platform::ENGINE_SOURCE;
use frontdesk_types::{CallEvent, CallEventKind, CallReport, CollectedInfo, ToolCallRecord};
use serde_json::Value;

/// Tool results are truncated to this many characters before recording.
const RESULT_LIMIT: usize = 500;

/// Accumulates the transcript and structured events for one call.
#[derive(Debug)]
pub struct CallLog {
    call_id: String,
    from: String,
    to: String,
    practice_id: String,
    agent_name: String,
    started_at: DateTime<Utc>,
    events: Vec<CallEvent>,
    tool_calls: Vec<ToolCallRecord>,
    collected_info: CollectedInfo,
    recording_url: Option<String>,
}

impl CallLog {
    pub fn new(from: &str, to: &str, practice_id: &str, agent_name: &str) -> Self {
        Self {
            call_id: uuid::Uuid::new_v4().to_string(),
            from: from.to_string(),
            to: to.to_string(),
            practice_id: practice_id.to_string(),
            agent_name: agent_name.to_string(),
            started_at: Utc::now(),
            events: Vec::new(),
            tool_calls: Vec::new(),
            collected_info: CollectedInfo::default(),
            recording_url: None,
        }
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    pub fn set_recording_url(&mut self, url: String) {
        self.recording_url = Some(url);
    }

    pub fn log_caller_speech(&mut self, text: &str) {
        self.push(CallEventKind::CallerSpeech {
            text: text.to_string(),
        });
    }

    pub fn log_agent_speech(&mut self, text: &str) {
        self.push(CallEventKind::AgentSpeech {
            text: text.to_string(),
        });
    }

    /// Records a tool invocation. `book_appointment` arguments also
    /// update the structured collected-info block.
    pub fn log_tool_call(&mut self, tool: &str, args: Value, result: &str) {
        let result = truncate(result, RESULT_LIMIT).to_string();
        self.push(CallEventKind::ToolCall {
            tool: tool.to_string(),
            args: args.clone(),
            result: result.clone(),
        });
        self.tool_calls.push(ToolCallRecord {
            tool: tool.to_string(),
            args: args.clone(),
            result,
        });

        if tool == "book_appointment" {
            let field = |key: &str| {
                args.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            self.collected_info = CollectedInfo {
                patient_name: field("patient_name"),
                patient_phone: field("patient_phone"),
                patient_email: field("patient_email"),
                procedure_type: field("procedure_type"),
                appointment_date: field("date"),
                appointment_time: field("time"),
            };
        }
    }

    pub fn log_call_end(&mut self, reason: &str) {
        self.push(CallEventKind::CallEnd {
            reason: reason.to_string(),
        });
    }

    /// Renders the human-readable transcript: one line per speech turn,
    /// tool calls as bracketed markers.
    pub fn transcript(&self) -> String {
        let mut lines = Vec::new();
        for event in &self.events {
            match &event.kind {
                CallEventKind::CallerSpeech { text } => lines.push(format!("Caller: {text}")),
                CallEventKind::AgentSpeech { text } => {
                    lines.push(format!("{}: {text}", self.agent_name))
                }
                CallEventKind::ToolCall { tool, .. } => lines.push(format!("[Tool: {tool}]")),
                CallEventKind::CallEnd { .. } => {}
            }
        }
        lines.join("\n")
    }

    /// Builds the post-call report, consuming the log.
    pub fn into_report(self) -> CallReport {
        CallReport {
            source: ENGINE_SOURCE.to_string(),
            transcript: self.transcript(),
            call_id: self.call_id,
            from: self.from,
            to: self.to,
            practice_id: self.practice_id,
            started_at: self.started_at,
            ended_at: Utc::now(),
            status: "completed".to_string(),
            recording_url: self.recording_url,
            collected_info: self.collected_info,
            tool_calls: self.tool_calls,
            events: self.events,
        }
    }

    fn push(&mut self, kind: CallEventKind) {
        tracing::info!(
            call_id = %self.call_id,
            event = kind.event_type(),
            "call event"
        );
        self.events.push(CallEvent {
            timestamp: Utc::now(),
            kind,
        });
    }
}

/// Truncates to at most `max` characters.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log() -> CallLog {
        CallLog::new("+15550001111", "+15552223333", "prc_7", "Relay")
    }

    #[test]
    fn call_ids_are_unique() {
        assert_ne!(log().call_id(), log().call_id());
    }

    #[test]
    fn transcript_renders_speech_and_tool_markers() {
        let mut log = log();
        log.log_caller_speech("Hi, I'd like to book a cleaning");
        log.log_agent_speech("Of course! What day works for you?");
        log.log_tool_call("check_availability", json!({"date": "2026-03-02"}), "{}");
        log.log_call_end("caller_disconnected");

        assert_eq!(
            log.transcript(),
            "Caller: Hi, I'd like to book a cleaning\n\
             Relay: Of course! What day works for you?\n\
             [Tool: check_availability]"
        );
    }

    #[test]
    fn book_appointment_args_fill_collected_info() {
        let mut log = log();
        log.log_tool_call(
            "book_appointment",
            json!({
                "patient_name": "Maria Lopez",
                "patient_phone": "+15550001111",
                "date": "2026-03-02",
                "time": "9:00 AM",
                "procedure_type": "cleaning",
            }),
            r#"{"status": "confirmed"}"#,
        );

        let report = log.into_report();
        assert_eq!(report.collected_info.patient_name, "Maria Lopez");
        assert_eq!(report.collected_info.appointment_date, "2026-03-02");
        assert_eq!(report.collected_info.appointment_time, "9:00 AM");
        assert_eq!(report.collected_info.procedure_type, "cleaning");
        // Absent args stay empty rather than failing.
        assert_eq!(report.collected_info.patient_email, "");
    }

    #[test]
    fn other_tools_do_not_touch_collected_info() {
        let mut log = log();
        log.log_tool_call("send_sms", json!({"phone": "+15550001111"}), "sent");
        assert!(log.into_report().collected_info.is_empty());
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let mut log = log();
        let long = "é".repeat(600);
        log.log_tool_call("lookup_patient", json!({}), &long);

        let report = log.into_report();
        assert_eq!(report.tool_calls[0].result.chars().count(), 500);
    }

    #[test]
    fn tool_results_are_truncated() {
        let mut log = log();
        let long = "x".repeat(2000);
        log.log_tool_call("lookup_patient", json!({}), &long);

        let report = log.into_report();
        assert_eq!(report.tool_calls[0].result.len(), 500);
        match &report.events[0].kind {
            CallEventKind::ToolCall { result, .. } => assert_eq!(result.len(), 500),
            other => panic!("expected tool call event, got {other:?}"),
        }
    }

    #[test]
    fn report_carries_call_identity_and_events() {
        let mut log = log();
        let call_id = log.call_id().to_string();
        log.log_caller_speech("hello");
        log.log_call_end("caller_disconnected");
        log.set_recording_url("https://bucket.s3.us-east-1.amazonaws.com/r.ogg".to_string());

        let report = log.into_report();
        assert_eq!(report.call_id, call_id);
        assert_eq!(report.source, "frontdesk-voice-engine");
        assert_eq!(report.from, "+15550001111");
        assert_eq!(report.to, "+15552223333");
        assert_eq!(report.practice_id, "prc_7");
        assert_eq!(report.status, "completed");
        assert_eq!(report.events.len(), 2);
        assert!(report.recording_url.is_some());
        assert!(report.ended_at >= report.started_at);
    }
}
