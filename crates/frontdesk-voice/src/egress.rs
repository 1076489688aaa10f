//! Call recording via the LiveKit Egress service.
//!
//! Starts an audio-only room composite egress that uploads the mixed
//! call audio to S3-compatible storage as
//! `recordings/{practice_id}/{call_id}.ogg`. Egress runs on the LiveKit
//! server; the worker only drives it over the Twirp HTTP API and polls
//! for completion after the call ends.

use crate::config::{LiveKitConfig, S3Target};
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const EGRESS_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const EGRESS_TOKEN_TTL: Duration = Duration::from_secs(600);

/// Interval between egress status polls after the call ends.
const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Drives call recordings through the LiveKit Egress Twirp API.
#[derive(Debug)]
pub struct EgressClient {
    base_url: String,
    api_key: String,
    api_secret: String,
    s3: S3Target,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct StartRoomCompositeRequest<'a> {
    room_name: &'a str,
    audio_only: bool,
    file_outputs: Vec<FileOutput<'a>>,
}

#[derive(Serialize)]
struct FileOutput<'a> {
    file_type: &'a str,
    filepath: String,
    s3: S3Upload<'a>,
}

#[derive(Serialize)]
struct S3Upload<'a> {
    access_key: &'a str,
    secret: &'a str,
    bucket: &'a str,
    region: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    endpoint: &'a str,
    force_path_style: bool,
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

#[derive(Serialize)]
struct StopEgressRequest<'a> {
    egress_id: &'a str,
}

#[derive(Serialize)]
struct ListEgressRequest<'a> {
    egress_id: &'a str,
}

/// Egress state as reported by the server. The Twirp JSON codec may
/// emit either proto or camelCase field names.
#[derive(Debug, Deserialize)]
pub struct EgressInfo {
    #[serde(alias = "egressId", default)]
    pub egress_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: String,
}

#[derive(Deserialize)]
struct ListEgressResponse {
    #[serde(default)]
    items: Vec<EgressInfo>,
}

impl EgressClient {
    pub fn new(livekit: &LiveKitConfig, s3: S3Target) -> Self {
        Self {
            base_url: livekit.http_url().trim_end_matches('/').to_string(),
            api_key: livekit.api_key.clone(),
            api_secret: livekit.api_secret.clone(),
            s3,
            http: reqwest::Client::new(),
        }
    }

    /// True when a storage target is configured. When false, calls
    /// proceed without recording.
    pub fn is_enabled(&self) -> bool {
        self.s3.is_configured()
    }

    /// Storage object path for a call recording.
    pub fn object_path(practice_id: &str, call_id: &str) -> String {
        format!("recordings/{practice_id}/{call_id}.ogg")
    }

    /// Public URL of a finished recording, for the post-call report.
    pub fn recording_url(&self, practice_id: &str, call_id: &str) -> String {
        let path = Self::object_path(practice_id, call_id);
        if self.s3.endpoint.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.s3.bucket, self.s3.region, path
            )
        } else {
            format!(
                "{}/{}/{}",
                self.s3.endpoint.trim_end_matches('/'),
                self.s3.bucket,
                path
            )
        }
    }

    /// Starts an audio-only recording of the room. Returns the egress id.
    ///
    /// # Errors
    ///
    /// Returns `RecordingDisabled` when no storage target is configured,
    /// or an egress error when the server rejects the request. Callers
    /// log the error and continue the call without recording.
    pub async fn start_room_recording(
        &self,
        room_name: &str,
        practice_id: &str,
        call_id: &str,
    ) -> Result<String, VoiceError> {
        if !self.is_enabled() {
            return Err(VoiceError::RecordingDisabled);
        }

        let request = StartRoomCompositeRequest {
            room_name,
            audio_only: true,
            file_outputs: vec![FileOutput {
                file_type: "OGG",
                filepath: Self::object_path(practice_id, call_id),
                s3: S3Upload {
                    access_key: &self.s3.access_key,
                    secret: &self.s3.secret_key,
                    bucket: &self.s3.bucket,
                    region: &self.s3.region,
                    endpoint: &self.s3.endpoint,
                    force_path_style: !self.s3.endpoint.is_empty(),
                },
            }],
        };

        let info: EgressInfo = self.twirp("StartRoomCompositeEgress", &request).await?;
        tracing::info!(
            egress_id = %info.egress_id,
            room = room_name,
            "recording started"
        );
        Ok(info.egress_id)
    }

    /// Stops a running egress.
    pub async fn stop(&self, egress_id: &str) -> Result<(), VoiceError> {
        let _: EgressInfo = self
            .twirp("StopEgress", &StopEgressRequest { egress_id })
            .await?;
        Ok(())
    }

    /// Polls the egress until it completes, fails, or `timeout` elapses.
    /// Returns true only on completion; on timeout the egress is
    /// stopped so the partial file still uploads.
    pub async fn wait_for_completion(&self, egress_id: &str, timeout: Duration) -> bool {
        if egress_id.is_empty() {
            return false;
        }

        let mut elapsed = Duration::ZERO;
        while elapsed < timeout {
            tokio::time::sleep(POLL_INTERVAL).await;
            elapsed += POLL_INTERVAL;

            let response: ListEgressResponse = match self
                .twirp("ListEgress", &ListEgressRequest { egress_id })
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(egress_id, error = %e, "egress status poll failed");
                    return false;
                }
            };

            let Some(info) = response.items.first() else {
                continue;
            };
            match info.status.as_str() {
                "EGRESS_COMPLETE" => {
                    tracing::info!(egress_id, "recording completed");
                    return true;
                }
                "EGRESS_FAILED" | "EGRESS_ABORTED" => {
                    tracing::error!(
                        egress_id,
                        status = %info.status,
                        error = %info.error,
                        "recording failed"
                    );
                    return false;
                }
                status => {
                    tracing::debug!(egress_id, status, elapsed_secs = elapsed.as_secs(), "recording in progress");
                }
            }
        }

        tracing::warn!(egress_id, timeout_secs = timeout.as_secs(), "recording timed out, stopping egress");
        if let Err(e) = self.stop(egress_id).await {
            tracing::error!(egress_id, error = %e, "failed to stop timed-out egress");
        }
        false
    }

    async fn twirp<Req, Resp>(&self, method: &str, body: &Req) -> Result<Resp, VoiceError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/twirp/livekit.Egress/{}", self.base_url, method);
        let token = self.auth_token()?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .timeout(EGRESS_REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(VoiceError::Egress(format!(
                "{method} returned status {}: {text}",
                status.as_u16()
            )));
        }

        Ok(response.json().await?)
    }

    fn auth_token(&self) -> Result<String, VoiceError> {
        AccessToken::with_api_key(&self.api_key, &self.api_secret)
            .with_identity("frontdesk-egress")
            .with_grants(VideoGrants {
                room_record: true,
                ..Default::default()
            })
            .with_ttl(EGRESS_TOKEN_TTL)
            .to_jwt()
            .map_err(VoiceError::LiveKit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(s3: S3Target) -> EgressClient {
        let livekit = LiveKitConfig::new("ws://localhost:7880", "devkey", "secret");
        EgressClient::new(&livekit, s3)
    }

    fn configured_s3() -> S3Target {
        S3Target {
            bucket: "call-recordings".to_string(),
            region: "us-east-1".to_string(),
            access_key: "AKIA123".to_string(),
            secret_key: "secret".to_string(),
            endpoint: String::new(),
        }
    }

    #[test]
    fn object_path_layout() {
        assert_eq!(
            EgressClient::object_path("prc_7", "call-abc"),
            "recordings/prc_7/call-abc.ogg"
        );
    }

    #[test]
    fn recording_url_on_aws() {
        let client = client(configured_s3());
        assert_eq!(
            client.recording_url("prc_7", "call-abc"),
            "https://call-recordings.s3.us-east-1.amazonaws.com/recordings/prc_7/call-abc.ogg"
        );
    }

    #[test]
    fn recording_url_on_custom_endpoint() {
        let mut s3 = configured_s3();
        s3.endpoint = "https://storage.example.com/s3/".to_string();
        let client = client(s3);
        assert_eq!(
            client.recording_url("prc_7", "call-abc"),
            "https://storage.example.com/s3/call-recordings/recordings/prc_7/call-abc.ogg"
        );
    }

    #[tokio::test]
    async fn start_without_storage_is_disabled() {
        let client = client(S3Target::default());
        assert!(!client.is_enabled());
        let result = client.start_room_recording("room", "prc_7", "call-abc").await;
        assert!(matches!(result, Err(VoiceError::RecordingDisabled)));
    }
}
