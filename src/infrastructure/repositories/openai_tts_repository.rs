use super::tts_repository::{text_preview, ChunkSynthesizer};
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
pub const DEFAULT_CHUNK_LIMIT: usize = 4096;

/// OpenAI TTS implementation of the chunk synthesizer
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
    chunk_limit: usize,
}

impl OpenAiTtsRepository {
    pub fn new(
        client: Arc<Client<OpenAIConfig>>,
        model: String,
        voice: String,
        chunk_limit: usize,
    ) -> Self {
        Self {
            client,
            model,
            voice,
            chunk_limit,
        }
    }
}

#[async_trait]
impl ChunkSynthesizer for OpenAiTtsRepository {
    fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }

    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, String> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            text_preview = text_preview(text),
            "Calling OpenAI TTS API"
        );

        // Parse model string to SpeechModel enum
        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        // Parse voice string to Voice enum
        let voice = match self.voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy, // Default fallback
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice,
            // WAV keeps the downstream decode step codec-free
            response_format: Some(SpeechResponseFormat::Wav),
            speed: None, // Defaults to 1.0
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %self.voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}
