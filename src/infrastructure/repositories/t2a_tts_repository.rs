use super::tts_repository::TtsRepository;
use crate::domain::audio::{resource::MIME_MP3, AudioResource};
use crate::domain::tts::{decode_hex, AudioPayload, Credentials, SynthesisError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

/// Fixed voice and audio settings sent with every request
const SPEED: f32 = 1.0;
const VOLUME: f32 = 1.0;
const PITCH: i32 = 0;
const SAMPLE_RATE: u32 = 32000;
const BITRATE: u32 = 128000;
const FORMAT: &str = "mp3";
const CHANNELS: u8 = 1;

#[derive(Debug, Serialize)]
struct T2aRequest<'a> {
    model: &'a str,
    text: &'a str,
    stream: bool,
    voice_setting: VoiceSetting<'a>,
    audio_setting: AudioSetting,
}

#[derive(Debug, Serialize)]
struct VoiceSetting<'a> {
    voice_id: &'a str,
    speed: f32,
    vol: f32,
    pitch: i32,
}

#[derive(Debug, Serialize)]
struct AudioSetting {
    sample_rate: u32,
    bitrate: u32,
    format: &'static str,
    channel: u8,
}

#[derive(Debug, Deserialize)]
struct T2aResponse {
    base_resp: Option<BaseResp>,
    data: Option<T2aData>,
    trace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BaseResp {
    status_code: i64,
    #[serde(default)]
    status_msg: String,
}

#[derive(Debug, Deserialize)]
struct T2aData {
    audio: Option<String>,
    audio_file: Option<String>,
    status: Option<i64>,
}

/// Text-to-audio (T2A) HTTP API implementation of TTS repository
pub struct T2aTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl T2aTtsRepository {
    pub fn new(base_url: String, model: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, model)
    }

    pub fn with_client(http_client: reqwest::Client, base_url: String, model: String) -> Self {
        Self {
            http_client,
            base_url,
            model,
        }
    }

    fn build_request<'a>(&'a self, text: &'a str, voice_id: &'a str) -> T2aRequest<'a> {
        T2aRequest {
            model: &self.model,
            text,
            stream: false,
            voice_setting: VoiceSetting {
                voice_id,
                speed: SPEED,
                vol: VOLUME,
                pitch: PITCH,
            },
            audio_setting: AudioSetting {
                sample_rate: SAMPLE_RATE,
                bitrate: BITRATE,
                format: FORMAT,
                channel: CHANNELS,
            },
        }
    }

    /// Call the T2A endpoint and classify its answer
    async fn call_t2a(
        &self,
        text: &str,
        voice_id: &str,
        credentials: &Credentials,
    ) -> Result<AudioPayload, SynthesisError> {
        tracing::info!(
            model = %self.model,
            voice_id = voice_id,
            text_length = text.chars().count(),
            text_preview = %text.chars().take(80).collect::<String>(),
            "Calling T2A synthesis API"
        );

        let response = self
            .http_client
            .post(&self.base_url)
            .query(&[("GroupId", credentials.group_id())])
            .header("Authorization", format!("Bearer {}", credentials.api_key()))
            .json(&self.build_request(text, voice_id))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice_id = voice_id, "T2A request could not be sent");
                SynthesisError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                voice_id = voice_id,
                "T2A request rejected at transport level"
            );
            return Err(SynthesisError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Network(format!("failed to read response body: {}", e)))?;

        parse_response(&body)
    }

    /// Download a clip the service hosts at `url`
    async fn fetch_audio_file(&self, url: &str) -> Result<AudioResource, SynthesisError> {
        tracing::debug!(url = url, "Fetching hosted audio file");

        let secondary_fetch = |reason: String| SynthesisError::SecondaryFetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| secondary_fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(secondary_fetch(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(MIME_MP3)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| secondary_fetch(e.to_string()))?;

        let audio = AudioResource::new(bytes.to_vec(), mime_type);
        if audio.is_empty() {
            return Err(secondary_fetch("empty audio file".to_string()));
        }

        Ok(audio)
    }

    async fn resolve(&self, payload: AudioPayload) -> Result<AudioResource, SynthesisError> {
        match payload {
            AudioPayload::InlineBytes(bytes) => Ok(AudioResource::mp3(bytes)),
            AudioPayload::RemoteUrl(url) => self.fetch_audio_file(&url).await,
        }
    }
}

/// Interpret a T2A response body that arrived with a successful HTTP status.
///
/// The embedded `base_resp.status_code` decides success, not the transport
/// status. Inline hex audio wins over an audio URL when both are present.
fn parse_response(body: &[u8]) -> Result<AudioPayload, SynthesisError> {
    let response: T2aResponse = serde_json::from_slice(body)
        .map_err(|e| SynthesisError::MalformedResponse(e.to_string()))?;

    let base_resp = response
        .base_resp
        .ok_or_else(|| SynthesisError::MalformedResponse("missing base_resp".to_string()))?;

    if base_resp.status_code != 0 {
        tracing::warn!(
            status_code = base_resp.status_code,
            status_msg = %base_resp.status_msg,
            trace_id = ?response.trace_id,
            "T2A service reported an error"
        );
        return Err(SynthesisError::Service {
            status_code: base_resp.status_code,
            message: base_resp.status_msg,
        });
    }

    let data = response.data.ok_or(SynthesisError::NoAudioData)?;
    tracing::debug!(data_status = ?data.status, trace_id = ?response.trace_id, "T2A response received");

    if let Some(audio) = data.audio.filter(|a| !a.is_empty()) {
        return Ok(AudioPayload::InlineBytes(decode_hex(&audio)?));
    }

    if let Some(url) = data.audio_file.filter(|u| !u.trim().is_empty()) {
        return Ok(AudioPayload::RemoteUrl(url.trim().to_string()));
    }

    Err(SynthesisError::NoAudioData)
}

#[async_trait]
impl TtsRepository for T2aTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        credentials: &Credentials,
    ) -> Result<AudioResource, SynthesisError> {
        let start_time = std::time::Instant::now();

        let payload = self.call_t2a(text, voice_id, credentials).await?;
        let payload_kind = payload.kind();
        let audio = self.resolve(payload).await?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "t2a",
            model = %self.model,
            voice_id = voice_id,
            payload = payload_kind,
            latency_ms = duration.as_millis(),
            characters_count = text.chars().count(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
