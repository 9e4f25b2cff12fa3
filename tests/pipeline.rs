//! End-to-end pipeline tests driving the TTS service with a stub backend:
//! segmentation, per-chunk orchestration with partial failures, and
//! stitching into one WAV file. No network involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use longform_tts_backend::domain::audio::{decode_wav, encode_wav, PcmFormat};
use longform_tts_backend::domain::tts::{
    ProgressFn, TtsService, TtsServiceApi, TtsServiceError,
};
use longform_tts_backend::infrastructure::repositories::ChunkSynthesizer;

const SAMPLES_PER_CHUNK: usize = 4;

/// Backend stub: chunks containing "FAIL" error out; everything else yields
/// a small WAV whose samples carry the chunk's first byte, so segment order
/// is observable in the stitched output.
struct StubBackend {
    chunk_limit: usize,
    calls: AtomicUsize,
}

impl StubBackend {
    fn new(chunk_limit: usize) -> Self {
        Self {
            chunk_limit,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChunkSynthesizer for StubBackend {
    fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }

    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("FAIL") {
            return Err("stub backend refused this chunk".to_string());
        }
        let marker = text.as_bytes()[0] as i16;
        encode_wav(&PcmFormat::default(), &[marker; SAMPLES_PER_CHUNK])
    }
}

fn progress_recorder() -> (ProgressFn, Arc<Mutex<Vec<(usize, usize)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let on_progress: ProgressFn = Arc::new(move |completed, total| {
        sink.lock().unwrap().push((completed, total));
    });
    (on_progress, seen)
}

/// Three short paragraphs with a chunk limit that forces one chunk each
fn three_paragraph_text() -> String {
    "alpha.\n\nbravo.\n\ncharlie.".to_string()
}

#[tokio::test]
async fn test_synthesize_stitches_all_chunks_in_order() {
    let backend = Arc::new(StubBackend::new(10));
    let service = TtsService::new(backend.clone());
    let (on_progress, seen) = progress_recorder();

    let result = service
        .synthesize(three_paragraph_text(), on_progress)
        .await
        .unwrap();

    assert_eq!(result.chunk_count, 3);
    assert_eq!(result.chunks_failed, 0);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3);

    // Stitched samples are the per-chunk markers, in original order
    let decoded = decode_wav(&result.audio.wav_data).unwrap();
    let expected: Vec<i16> = [b'a', b'b', b'c']
        .iter()
        .flat_map(|&m| vec![m as i16; SAMPLES_PER_CHUNK])
        .collect();
    assert_eq!(decoded.samples, expected);

    // Total sample count is the sum of the constituent segments
    assert_eq!(result.audio.sample_count, 3 * SAMPLES_PER_CHUNK);

    // Progress is monotonic and terminates at (total, total)
    assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_synthesize_output_header_round_trip() {
    let backend = Arc::new(StubBackend::new(10));
    let service = TtsService::new(backend);
    let (on_progress, _) = progress_recorder();

    let result = service
        .synthesize(three_paragraph_text(), on_progress)
        .await
        .unwrap();

    let decoded = decode_wav(&result.audio.wav_data).unwrap();
    assert_eq!(decoded.format, PcmFormat::default());
    assert_eq!(decoded.format, result.audio.format);
    assert_eq!(decoded.samples.len(), result.audio.sample_count);
}

#[tokio::test]
async fn test_synthesize_tolerates_partial_failure() {
    let backend = Arc::new(StubBackend::new(10));
    let service = TtsService::new(backend.clone());
    let (on_progress, seen) = progress_recorder();

    let text = "alpha.\n\nFAIL.\n\ncharlie.";
    let result = service
        .synthesize(text.to_string(), on_progress)
        .await
        .unwrap();

    assert_eq!(result.chunk_count, 3);
    assert_eq!(result.chunks_failed, 1);

    // The failed chunk is silently omitted: no gap, no silence padding
    let decoded = decode_wav(&result.audio.wav_data).unwrap();
    let expected: Vec<i16> = [b'a', b'c']
        .iter()
        .flat_map(|&m| vec![m as i16; SAMPLES_PER_CHUNK])
        .collect();
    assert_eq!(decoded.samples, expected);

    // Every chunk was attempted and final progress is still (N, N)
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3);
    assert_eq!(seen.lock().unwrap().last(), Some(&(3, 3)));
}

#[tokio::test]
async fn test_synthesize_all_failures_is_no_audio_produced() {
    let backend = Arc::new(StubBackend::new(10));
    let service = TtsService::new(backend.clone());
    let (on_progress, _) = progress_recorder();

    let text = "FAIL one.\n\nFAIL two.";
    let result = service.synthesize(text.to_string(), on_progress).await;

    assert!(matches!(
        result,
        Err(TtsServiceError::NoAudioProduced(2))
    ));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_synthesize_empty_input_never_calls_backend() {
    let backend = Arc::new(StubBackend::new(10));
    let service = TtsService::new(backend.clone());

    for text in ["", "   ", "\n\n\n\n"] {
        let (on_progress, seen) = progress_recorder();
        let result = service.synthesize(text.to_string(), on_progress).await;

        assert!(matches!(result, Err(TtsServiceError::EmptyInput)));
        assert!(seen.lock().unwrap().is_empty());
    }

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_synthesize_long_document_respects_chunk_limit() {
    let backend = Arc::new(StubBackend::new(80));
    let service = TtsService::new(backend.clone());
    let (on_progress, _) = progress_recorder();

    // One long paragraph of sentences, forcing the sentence-level fallback
    let text = "Every sentence in this text is modest. ".repeat(30);
    let result = service
        .synthesize(text.trim_end().to_string(), on_progress)
        .await
        .unwrap();

    assert!(result.chunk_count > 1);
    assert_eq!(
        backend.calls.load(Ordering::SeqCst),
        result.chunk_count
    );
    assert_eq!(
        result.audio.sample_count,
        result.chunk_count * SAMPLES_PER_CHUNK
    );
}
