//! Cloud caption engine
//!
//! Sends the media reference to a hosted transcription service and maps the
//! JSON response into subtitle tracks. Requires a credential: without one,
//! initialization fails and the registry retries on a later use once the
//! user has configured a key.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::Deserialize;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{ProviderContext, ProviderLifecycle, SubtitleEngine, SubtitleRequest};
use glossa_domain::value_objects::{InputKind, MediaSource, SubtitleCue, SubtitleTrack};
use glossa_registry::{EngineDescriptor, EngineRegistration};

use crate::constants::{CLOUD_TRANSCRIBE_TIMEOUT_SECS, USER_AGENT};

const ENGINE_ID: &str = "cloud-captions";

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    tracks: Vec<TrackPayload>,
}

#[derive(Debug, Deserialize)]
struct TrackPayload {
    language: String,
    cues: Vec<CuePayload>,
}

#[derive(Debug, Deserialize)]
struct CuePayload {
    start_ms: u64,
    end_ms: u64,
    text: String,
}

/// Engine calling a hosted transcription endpoint
pub struct CloudCaptionEngine {
    endpoint: String,
    api_key: Option<String>,
    client: RwLock<Option<Client>>,
}

impl CloudCaptionEngine {
    /// Create an engine for `endpoint`, with an optional credential
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: RwLock::new(None),
        }
    }

    fn payload(request: &SubtitleRequest) -> Result<serde_json::Value> {
        let media = match &request.source {
            MediaSource::RemoteUrl { url, .. } => serde_json::json!({ "url": url }),
            MediaSource::LocalFile { .. } | MediaSource::PastedText { .. } => {
                return Err(Error::invalid_input(
                    "cloud captioning accepts remote URLs only",
                ));
            }
        };
        Ok(serde_json::json!({
            "media": media,
            "languages": request.languages,
        }))
    }
}

#[async_trait]
impl ProviderLifecycle for CloudCaptionEngine {
    async fn initialize(&self, _ctx: &ProviderContext) -> Result<()> {
        if self.api_key.is_none() {
            return Err(Error::configuration(
                "cloud captioning needs an API key; set subtitles.cloud_api_key",
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(CLOUD_TRANSCRIBE_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::network("failed to build HTTP client", e))?;
        *self.client.write() = Some(client);
        Ok(())
    }
}

#[async_trait]
impl SubtitleEngine for CloudCaptionEngine {
    async fn generate(
        &self,
        request: &SubtitleRequest,
        _ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>> {
        let client = self
            .client
            .read()
            .clone()
            .ok_or_else(|| Error::configuration("engine used before initialization"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::configuration("missing API key"))?;

        let response = client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&Self::payload(request)?)
            .send()
            .await
            .map_err(|e| Error::network(format!("request to '{}' failed", self.endpoint), e))?;
        if !response.status().is_success() {
            return Err(Error::Network {
                message: format!("transcription service answered {}", response.status()),
                source: None,
            });
        }
        let parsed: TranscribeResponse = response
            .json()
            .await
            .map_err(|e| Error::network("malformed transcription response", e))?;

        Ok(parsed
            .tracks
            .into_iter()
            .map(|track| {
                let cues = track
                    .cues
                    .into_iter()
                    .enumerate()
                    .map(|(i, cue)| SubtitleCue {
                        index: u32::try_from(i).unwrap_or(u32::MAX) + 1,
                        start_ms: cue.start_ms,
                        end_ms: cue.end_ms,
                        text: cue.text,
                    })
                    .collect();
                SubtitleTrack::new(track.language, ENGINE_ID, cues)
            })
            .collect())
    }
}

/// Build the cloud caption registration
pub fn registration(endpoint: String, api_key: Option<String>) -> EngineRegistration {
    let descriptor = EngineDescriptor::new(ENGINE_ID)
        .with_name("Cloud captions")
        .with_description("Hosted speech-to-text transcription")
        .with_input_kinds([InputKind::Audio, InputKind::Video, InputKind::Url])
        .with_language("*")
        .with_cloud_service()
        .with_credential_required();
    EngineRegistration::factory(descriptor, move |_descriptor| {
        Ok(Arc::new(CloudCaptionEngine::new(
            endpoint.clone(),
            api_key.clone(),
        )))
    })
}
