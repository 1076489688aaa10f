use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Room service error: {0}")]
    RoomService(String),

    #[error("Egress request failed: {0}")]
    EgressTransport(#[from] reqwest::Error),

    #[error("Egress error: {0}")]
    Egress(String),

    #[error("Recording storage not configured")]
    RecordingDisabled,
}
