//! HTTP client for the backend practice-management platform.
//!
//! Three endpoints, all bearer-authenticated:
//! - `GET  /voice-engine/practice-config` — resolve a practice by id or
//!   by the called phone number
//! - `POST /voice-engine/actions` — execute an agent tool action
//!   (patient lookup, booking, SMS, email, message logging)
//! - `POST /webhooks/voice-engine` — deliver the post-call report
//!
//! Failure policy follows the worker's degrade-silently rule: practice
//! fetches return typed errors so the caller can fall back to env
//! defaults, action dispatch always yields a result envelope the LLM
//! can speak to, and webhook delivery logs and swallows its failures.

mod client;
mod error;

pub use client::{PlatformClient, PracticeQuery, ENGINE_SOURCE};
pub use error::PlatformError;
