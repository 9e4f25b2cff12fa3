use std::sync::Arc;

use super::error::TtsServiceError;
use super::segmenter::Chunk;
use crate::domain::audio::{decode_wav, AudioSegment};
use crate::infrastructure::repositories::ChunkSynthesizer;

/// Progress observer invoked after every chunk attempt (success or failure)
/// with `(chunks completed, chunks total)`
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Drive every chunk through the synthesizer, in index order, one call per
/// chunk with no retry. Failed or undecodable chunks are logged and skipped;
/// the surviving decoded segments keep their original relative order.
///
/// Returns `NoAudioProduced` if not a single chunk survived. Progress always
/// terminates at `(total, total)`, regardless of failures.
pub async fn run(
    chunks: &[Chunk],
    synthesizer: &dyn ChunkSynthesizer,
    on_progress: &ProgressFn,
) -> Result<Vec<AudioSegment>, TtsServiceError> {
    let total = chunks.len();
    let mut segments: Vec<AudioSegment> = Vec::with_capacity(total);

    for (attempted, chunk) in chunks.iter().enumerate() {
        tracing::info!(
            chunk_index = chunk.index,
            chunk_total = total,
            chunk_size = chunk.text.len(),
            "Synthesizing chunk"
        );

        match synthesizer.synthesize_chunk(&chunk.text).await {
            Ok(audio_bytes) => match decode_wav(&audio_bytes) {
                Ok(segment) => {
                    tracing::debug!(
                        chunk_index = chunk.index,
                        samples = segment.samples.len(),
                        sample_rate = segment.format.sample_rate,
                        "Chunk decoded"
                    );
                    segments.push(segment);
                }
                Err(error) => {
                    // Undecodable audio is skipped exactly like a failed call
                    tracing::warn!(
                        chunk_index = chunk.index,
                        error = %error,
                        "Skipping chunk: returned audio could not be decoded"
                    );
                }
            },
            Err(error) => {
                tracing::warn!(
                    chunk_index = chunk.index,
                    error = %error,
                    "Skipping chunk: synthesis failed"
                );
            }
        }

        on_progress(attempted + 1, total);
    }

    if segments.is_empty() {
        return Err(TtsServiceError::NoAudioProduced(total));
    }

    Ok(segments)
}
