//! Quick test: create a LiveKit room and print a join token so you can
//! talk to the agent from a browser.
//!
//! Run: cargo run --bin place-test-call

use frontdesk_voice::{LiveKitConfig, VoiceService};

#[tokio::main]
async fn main() {
    let config = frontdesk_config::load_config(Some("frontdesk.toml"))
        .expect("failed to load configuration");

    let service = VoiceService::new(LiveKitConfig::new(
        &config.livekit.url,
        &config.livekit.api_key,
        &config.livekit.api_secret,
    ));

    let room = service
        .create_room("test-call-001")
        .await
        .expect("failed to create room — is the LiveKit server running?");
    println!("Room created: {}", room.name);

    let token = service
        .generate_join_token(&room.name, "test-caller", "Test Caller")
        .expect("failed to generate join token");

    println!();
    println!("{}", "=".repeat(60));
    println!("TEST YOUR AGENT");
    println!("{}", "=".repeat(60));
    println!();
    println!("Open the LiveKit Agents Playground:");
    println!("https://agents-playground.livekit.io/");
    println!();
    println!("Or connect manually:");
    println!("Room:  {}", room.name);
    println!("Token: {token}");
    println!();
    println!("LiveKit URL: {}", config.livekit.url);
    println!("{}", "=".repeat(60));
}
