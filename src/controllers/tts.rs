use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{ProgressFn, TtsRequest, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
};

pub struct TtsController {
    tts_service: Arc<TtsService>,
    max_text_length: usize,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, max_text_length: usize) -> Self {
        Self {
            tts_service,
            max_text_length,
        }
    }

    /// POST /api/tts/synthesize - Convert long-form text to one WAV file
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        Json(request): Json<TtsRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        tracing::info!(text_length = request.text.len(), "TTS synthesis request");

        if request.text.len() > controller.max_text_length {
            return Err(AppError::PayloadTooLarge(format!(
                "Text must be {} characters or less",
                controller.max_text_length
            )));
        }

        // The core reports per-chunk progress through this callback; the
        // HTTP layer only renders it into the request log
        let on_progress: ProgressFn = Arc::new(|completed, total| {
            tracing::info!(completed = completed, total = total, "Chunk progress");
        });

        // Synthesize speech using service (empty input is rejected there,
        // before any backend call)
        let result = controller
            .tts_service
            .synthesize(request.text, on_progress)
            .await
            .map_err(AppError::from)?;

        let duration_seconds = result.audio.duration_seconds() as u64;

        // Build headers
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/wav".parse().unwrap());
        headers.insert(
            "X-Duration-Seconds",
            duration_seconds.to_string().parse().unwrap(),
        );
        headers.insert(
            "X-Chunk-Count",
            result.chunk_count.to_string().parse().unwrap(),
        );
        headers.insert(
            "X-Chunks-Failed",
            result.chunks_failed.to_string().parse().unwrap(),
        );

        Ok((StatusCode::OK, headers, Body::from(result.audio.wav_data)))
    }
}
