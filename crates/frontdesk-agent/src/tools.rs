//! Agent tools: the actions the LLM can take during a call.
//!
//! Most tools are thin wrappers over the platform's action endpoint and
//! return caller-friendly strings the LLM can speak directly. Failures
//! never surface as errors to the conversation; each tool degrades to a
//! reassuring fallback line instead.

use frontdesk_platform::PlatformClient;
use serde_json::{json, Value};

/// A tool exposed to the LLM: name, usage hint, and JSON schema for its
/// arguments.
#[derive(Debug, Clone)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// All tools the receptionist can call, in the order they are offered
/// to the LLM.
pub fn tool_definitions() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "lookup_patient",
            description: "Look up an existing patient by name or phone number.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Patient name to search for"},
                    "phone": {"type": "string", "description": "Patient phone number to search for"},
                },
            }),
        },
        ToolDef {
            name: "check_availability",
            description:
                "Check available appointment slots. Call this when a patient asks about availability.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "date": {"type": "string", "description": "The date to check (YYYY-MM-DD or natural language like 'next Tuesday')"},
                    "procedure_type": {"type": "string", "description": "Type of appointment (general, cleaning, emergency, consultation)"},
                },
                "required": ["date"],
            }),
        },
        ToolDef {
            name: "book_appointment",
            description:
                "Book an appointment for a patient. Use this after confirming details with the caller.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "patient_name": {"type": "string", "description": "Full name of the patient"},
                    "date": {"type": "string", "description": "Appointment date (YYYY-MM-DD)"},
                    "time": {"type": "string", "description": "Appointment time (e.g., '9:00 AM')"},
                    "procedure_type": {"type": "string", "description": "Type of procedure (cleaning, checkup, emergency, etc.)"},
                    "patient_phone": {"type": "string", "description": "Patient phone number"},
                    "patient_email": {"type": "string", "description": "Patient email address"},
                    "is_new_patient": {"type": "boolean", "description": "Whether this is a new patient"},
                },
                "required": ["patient_name", "date", "time", "procedure_type"],
            }),
        },
        ToolDef {
            name: "send_sms",
            description: "Send a confirmation SMS to the patient. Use after booking an appointment.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "to_phone": {"type": "string", "description": "Recipient phone number (E.164 format)"},
                    "message": {"type": "string", "description": "The SMS message text"},
                },
                "required": ["to_phone", "message"],
            }),
        },
        ToolDef {
            name: "send_email",
            description:
                "Send a confirmation email to the patient. Use after booking an appointment.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "to_email": {"type": "string", "description": "Recipient email address"},
                    "subject": {"type": "string", "description": "Email subject line"},
                    "body": {"type": "string", "description": "Email body text (plain text)"},
                },
                "required": ["to_email", "subject", "body"],
            }),
        },
        ToolDef {
            name: "log_message",
            description:
                "Log a message for staff follow-up when you can't resolve something directly.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "message": {"type": "string", "description": "What staff need to know"},
                    "department": {"type": "string", "description": "Which team should follow up (front_desk, billing, clinical)"},
                },
                "required": ["message"],
            }),
        },
        ToolDef {
            name: "transfer_call",
            description:
                "Transfer the call to a human staff member. Use when the caller needs something you cannot handle.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "reason": {"type": "string", "description": "Brief reason for the transfer"},
                    "department": {"type": "string", "description": "Which department to transfer to (front_desk, billing, clinical)"},
                },
                "required": ["reason"],
            }),
        },
        ToolDef {
            name: "end_call",
            description: "Hang up the phone. ALWAYS call this after saying goodbye.",
            parameters: json!({"type": "object", "properties": {}}),
        },
    ]
}

/// Executes tools for one call against a resolved practice.
pub struct Tools<'a> {
    platform: &'a PlatformClient,
    practice_id: &'a str,
}

impl<'a> Tools<'a> {
    pub fn new(platform: &'a PlatformClient, practice_id: &'a str) -> Self {
        Self {
            platform,
            practice_id,
        }
    }

    /// Runs a tool by name and returns the string handed back to the
    /// LLM. Unknown tool names yield a neutral refusal rather than an
    /// error.
    pub async fn execute(&self, name: &str, args: &Value) -> String {
        match name {
            "lookup_patient" => self.lookup_patient(args).await,
            "check_availability" => check_availability(args),
            "book_appointment" => self.book_appointment(args).await,
            "send_sms" => self.send_sms(args).await,
            "send_email" => self.send_email(args).await,
            "log_message" => self.log_message(args).await,
            "transfer_call" => transfer_call(args),
            "end_call" => "Goodbye.".to_string(),
            other => {
                tracing::warn!(tool = other, "unknown tool requested");
                "I'm not able to do that.".to_string()
            }
        }
    }

    async fn lookup_patient(&self, args: &Value) -> String {
        let name = str_arg(args, "name");
        let phone = str_arg(args, "phone");
        tracing::info!(name, phone, "looking up patient");

        let result = self
            .platform
            .dispatch_action(
                "lookup_patient",
                self.practice_id,
                json!({"name": name, "phone": phone}),
            )
            .await;

        if result["found"].as_bool().unwrap_or(false) {
            if let Some(p) = result["patients"].as_array().and_then(|p| p.first()) {
                let full_name = format!(
                    "{} {}",
                    p["first_name"].as_str().unwrap_or_default(),
                    p["last_name"].as_str().unwrap_or_default()
                );
                return json!({
                    "found": true,
                    "patient_id": p["id"],
                    "name": full_name.trim(),
                    "email": p["email"].as_str().unwrap_or_default(),
                    "phone": p["phone_mobile"].as_str().unwrap_or_default(),
                    "status": p["status"].as_str().unwrap_or_default(),
                })
                .to_string();
            }
        }
        json!({"found": false, "message": "No patient found with that information."}).to_string()
    }

    async fn book_appointment(&self, args: &Value) -> String {
        let patient_name = str_arg(args, "patient_name");
        let date = str_arg(args, "date");
        let time = str_arg(args, "time");
        tracing::info!(patient = patient_name, date, time, "booking appointment");

        let result = self
            .platform
            .dispatch_action(
                "book_appointment",
                self.practice_id,
                json!({
                    "patient_name": patient_name,
                    "date": date,
                    "time": time,
                    "procedure_type": str_arg(args, "procedure_type"),
                    "phone": str_arg(args, "patient_phone"),
                    "email": str_arg(args, "patient_email"),
                    "is_new_patient": args["is_new_patient"].as_bool().unwrap_or(true),
                }),
            )
            .await;

        if result["success"].as_bool().unwrap_or(false) {
            let message = result["message"].as_str().map(str::to_string).unwrap_or_else(|| {
                format!("Appointment booked for {patient_name} on {date} at {time}.")
            });
            return json!({
                "status": "confirmed",
                "appointment_id": result["appointment_id"],
                "patient_id": result["patient_id"],
                "message": message,
            })
            .to_string();
        }

        let error = result["error"].as_str().unwrap_or("unknown");
        json!({
            "status": "error",
            "message": format!("I wasn't able to book that appointment right now. Error: {error}"),
        })
        .to_string()
    }

    async fn send_sms(&self, args: &Value) -> String {
        let to_phone = str_arg(args, "to_phone");
        tracing::info!(to = to_phone, "sending confirmation SMS");

        let result = self
            .platform
            .dispatch_action(
                "send_sms",
                self.practice_id,
                json!({"phone": to_phone, "message": str_arg(args, "message")}),
            )
            .await;

        if result["success"].as_bool().unwrap_or(false) {
            format!("Confirmation text sent successfully to {to_phone}.")
        } else {
            "I wasn't able to send the text right now, but I've noted the appointment details."
                .to_string()
        }
    }

    async fn send_email(&self, args: &Value) -> String {
        let to_email = str_arg(args, "to_email");
        tracing::info!(to = to_email, "sending confirmation email");

        let result = self
            .platform
            .dispatch_action(
                "send_confirmation_email",
                self.practice_id,
                json!({
                    "email": to_email,
                    "subject": str_arg(args, "subject"),
                    "body": str_arg(args, "body"),
                }),
            )
            .await;

        if result["success"].as_bool().unwrap_or(false) {
            format!("Confirmation email sent successfully to {to_email}.")
        } else {
            "I wasn't able to send the email right now, but your appointment is confirmed."
                .to_string()
        }
    }

    async fn log_message(&self, args: &Value) -> String {
        let department = args["department"].as_str().unwrap_or("front_desk");
        tracing::info!(department, "logging message for staff");

        let result = self
            .platform
            .dispatch_action(
                "log_message",
                self.practice_id,
                json!({"message": str_arg(args, "message"), "department": department}),
            )
            .await;

        if result["success"].as_bool().unwrap_or(false) {
            "I've passed that along to our team. They'll follow up with you.".to_string()
        } else {
            "I've made a note of that for our team.".to_string()
        }
    }
}

/// Availability is answered locally with representative slots until the
/// platform grows a scheduling engine.
fn check_availability(args: &Value) -> String {
    let date = str_arg(args, "date");
    let procedure_type = args["procedure_type"].as_str().unwrap_or("general");
    tracing::info!(date, procedure_type, "checking availability");

    json!({
        "available_slots": [
            {"time": "9:00 AM", "provider": "Dr. Smith"},
            {"time": "10:30 AM", "provider": "Dr. Smith"},
            {"time": "2:00 PM", "provider": "Dr. Johnson"},
            {"time": "3:30 PM", "provider": "Dr. Johnson"},
        ],
        "date": date,
    })
    .to_string()
}

fn transfer_call(args: &Value) -> String {
    let reason = str_arg(args, "reason");
    let department = args["department"].as_str().unwrap_or("front_desk");
    tracing::info!(reason, department, "call transfer requested");
    format!(
        "I'm transferring you now to our {} team. One moment please.",
        department.replace('_', " ")
    )
}

fn str_arg<'v>(args: &'v Value, key: &str) -> &'v str {
    args[key].as_str().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_cover_every_tool() {
        let names: Vec<&str> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            [
                "lookup_patient",
                "check_availability",
                "book_appointment",
                "send_sms",
                "send_email",
                "log_message",
                "transfer_call",
                "end_call",
            ]
        );
    }

    #[test]
    fn definitions_have_object_schemas() {
        for tool in tool_definitions() {
            assert_eq!(tool.parameters["type"], "object", "{}", tool.name);
            assert!(!tool.description.is_empty(), "{}", tool.name);
        }
    }

    #[test]
    fn check_availability_returns_representative_slots() {
        let result = check_availability(&json!({"date": "2026-03-02"}));
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["date"], "2026-03-02");
        assert_eq!(parsed["available_slots"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["available_slots"][0]["provider"], "Dr. Smith");
    }

    #[test]
    fn transfer_call_speaks_the_department() {
        let result = transfer_call(&json!({"reason": "billing question", "department": "billing"}));
        assert!(result.contains("billing team"));

        let default = transfer_call(&json!({"reason": "anything"}));
        assert!(default.contains("front desk team"));
    }

    #[tokio::test]
    async fn unknown_tool_degrades_gracefully() {
        let platform = PlatformClient::new("http://127.0.0.1:1", "key");
        let tools = Tools::new(&platform, "prc_7");
        let result = tools.execute("open_pod_bay_doors", &json!({})).await;
        assert_eq!(result, "I'm not able to do that.");
    }

    #[tokio::test]
    async fn end_call_is_local() {
        let platform = PlatformClient::new("http://127.0.0.1:1", "key");
        let tools = Tools::new(&platform, "prc_7");
        assert_eq!(tools.execute("end_call", &json!({})).await, "Goodbye.");
    }
}
