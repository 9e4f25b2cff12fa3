use super::tts_repository::{text_preview, ChunkSynthesizer};
use crate::domain::audio::{wav_from_pcm, PcmFormat};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

/// Safe guess for the Gemini TTS per-request character limit; the API does
/// not document a hard number
pub const DEFAULT_CHUNK_LIMIT: usize = 4000;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini TTS implementation of the chunk synthesizer
///
/// Gemini returns base64 raw PCM plus an audio MIME descriptor such as
/// `audio/L16;codec=pcm;rate=24000`; the adapter wraps the payload in a
/// canonical WAV header before handing it to the pipeline.
pub struct GeminiTtsRepository {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
    chunk_limit: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

impl GeminiTtsRepository {
    pub fn new(api_key: String, model: String, voice: String, chunk_limit: usize) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
            model,
            voice,
            chunk_limit,
        }
    }

    /// Call the Gemini generateContent API for a single text chunk and
    /// return the raw PCM payload plus its MIME descriptor
    async fn call_gemini(&self, text: &str) -> Result<(Vec<u8>, String), String> {
        let url = format!("{}/{}:generateContent", API_BASE_URL, self.model);

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": text }]
            }],
            "generationConfig": {
                "temperature": 1,
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": self.voice }
                    }
                }
            }
        });

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    text_length = text.len(),
                    "Gemini TTS request failed"
                );
                format!("Gemini request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                detail = %detail,
                model = %self.model,
                "Gemini TTS API returned an error status"
            );
            return Err(format!("Gemini API returned {}: {}", status, detail));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Gemini TTS response");
            format!("Failed to parse Gemini response: {}", e)
        })?;

        let inline_data = payload
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.inline_data)
            .next()
            .ok_or_else(|| "Gemini response contained no audio data".to_string())?;

        let encoded = inline_data
            .data
            .ok_or_else(|| "Gemini audio part had an empty payload".to_string())?;
        let pcm = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| format!("Invalid base64 audio payload: {}", e))?;

        Ok((pcm, inline_data.mime_type.unwrap_or_default()))
    }
}

#[async_trait]
impl ChunkSynthesizer for GeminiTtsRepository {
    fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }

    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            text_preview = text_preview(text),
            "Calling Gemini TTS API"
        );

        let (pcm, mime_type) = self.call_gemini(text).await?;

        // The payload is headerless PCM; the MIME descriptor carries the
        // format (defaults: 16-bit, 24 kHz, mono)
        let format = PcmFormat::from_mime(&mime_type);
        tracing::debug!(
            audio_size = pcm.len(),
            mime_type = %mime_type,
            sample_rate = format.sample_rate,
            bits_per_sample = format.bits_per_sample,
            "Gemini audio received successfully"
        );

        Ok(wav_from_pcm(&pcm, &format))
    }
}
