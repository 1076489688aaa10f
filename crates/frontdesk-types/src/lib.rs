//! Shared types for the frontdesk voice agent platform.
//!
//! This crate provides the foundational types used across all frontdesk
//! crates: practice (tenant) configuration, call transcript events, and
//! voice catalog definitions.
//!
//! Sits at the bottom of the workspace graph: every other crate pulls
//! these types in, and this crate pulls in no internal crate, so data
//! can cross crate boundaries without cycles.

mod call;
mod practice;
mod voice;

pub use call::{CallEvent, CallEventKind, CallReport, CollectedInfo, ToolCallRecord};
pub use practice::{CallerInfo, OperatingHours, PracticeConfig, ProviderInfo};
pub use voice::{TtsProvider, VoiceOption};
