use super::error::TtsServiceError;
use super::orchestrator::{self, ProgressFn};
use super::segmenter::segment;
use super::stitcher::{stitch, FinalAudio};
use crate::infrastructure::repositories::ChunkSynthesizer;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TtsSynthesisResult {
    pub audio: FinalAudio,
    pub chunk_count: usize,
    pub chunks_failed: usize,
}

pub struct TtsService {
    synthesizer: Arc<dyn ChunkSynthesizer>,
}

impl TtsService {
    pub fn new(synthesizer: Arc<dyn ChunkSynthesizer>) -> Self {
        Self { synthesizer }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize long-form text into one continuous WAV waveform
    ///
    /// This operation:
    /// - Splits the text into chunks sized to the backend's limit
    /// - Synthesizes each chunk in order, tolerating individual failures
    /// - Stitches the surviving audio segments into a single file
    ///
    /// `on_progress` is invoked after every chunk attempt with
    /// `(completed, total)`.
    async fn synthesize(
        &self,
        text: String,
        on_progress: ProgressFn,
    ) -> Result<TtsSynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: String,
        on_progress: ProgressFn,
    ) -> Result<TtsSynthesisResult, TtsServiceError> {
        // Reported before any backend call is made
        if text.trim().is_empty() {
            return Err(TtsServiceError::EmptyInput);
        }

        let start_time = std::time::Instant::now();

        // 1. Split the document at paragraph/sentence boundaries
        let chunk_limit = self.synthesizer.chunk_limit();
        let chunks = segment(&text, chunk_limit);
        tracing::info!(
            chunk_count = chunks.len(),
            chunk_limit = chunk_limit,
            text_length = text.len(),
            "Text segmented into chunks"
        );

        // 2. Synthesize chunk by chunk, skipping failures
        let segments = orchestrator::run(&chunks, self.synthesizer.as_ref(), &on_progress).await?;

        let chunks_failed = chunks.len() - segments.len();
        if chunks_failed > 0 {
            tracing::warn!(
                chunks_failed = chunks_failed,
                chunk_count = chunks.len(),
                "Some chunks produced no audio and were skipped"
            );
        }

        // 3. Stitch the surviving segments into one waveform
        let audio = stitch(&segments).map_err(TtsServiceError::Dependency)?;

        let duration = start_time.elapsed();
        tracing::info!(
            latency_ms = duration.as_millis(),
            chunk_count = chunks.len(),
            chunks_failed = chunks_failed,
            audio_size_bytes = audio.wav_data.len(),
            audio_seconds = audio.duration_seconds(),
            "TTS synthesis completed"
        );

        Ok(TtsSynthesisResult {
            audio,
            chunk_count: chunks.len(),
            chunks_failed,
        })
    }
}
