//! Front desk worker: orchestrates voice calls for dental practices.
//!
//! Ties the other crates together: resolves the practice for each
//! dispatched call, builds the session blueprint, executes agent tools
//! against the platform, accumulates the call log, and delivers the
//! post-call report. The binary in `main.rs` adds configuration
//! loading, structured logging, and the health endpoint around this.

pub mod call_log;
pub mod lifecycle;
pub mod tools;

pub use call_log::CallLog;
pub use lifecycle::{
    call_attributes, CallAttributes, SessionBlueprint, SessionEvent, Speaker, Worker,
};
pub use tools::{tool_definitions, ToolDef, Tools};
