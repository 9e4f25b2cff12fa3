use async_trait::async_trait;

/// Adapter contract for a speech-synthesis backend.
/// Abstracts the underlying TTS provider (Gemini, OpenAI, etc.)
///
/// The pipeline core owns text splitting and audio stitching; an
/// implementation only converts one chunk of text into audio. It is
/// responsible for:
/// - Provider-specific authentication and wire protocol
/// - Returning a self-describing WAV container (prepending a header if the
///   provider yields headerless PCM)
/// - Advertising the provider's per-call character limit
#[async_trait]
pub trait ChunkSynthesizer: Send + Sync {
    /// Maximum character count the backend accepts in a single call
    fn chunk_limit(&self) -> usize;

    /// Synthesize a single chunk of text
    ///
    /// Returns WAV bytes decodable by the stitching stage.
    ///
    /// # Errors
    /// Returns error if the call fails or the provider returns no audio.
    /// The orchestrator treats any error as a skippable per-chunk failure.
    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, String>;
}

/// First 200 bytes of a chunk for request logging, truncated on a char
/// boundary so multi-byte text never splits mid-character
pub(crate) fn text_preview(text: &str) -> &str {
    let mut end = text.len().min(200);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_preview_short_text_unchanged() {
        assert_eq!(text_preview("hello"), "hello");
        assert_eq!(text_preview(""), "");
    }

    #[test]
    fn test_text_preview_truncates_long_text() {
        let text = "a".repeat(300);
        assert_eq!(text_preview(&text).len(), 200);
    }

    #[test]
    fn test_text_preview_never_splits_a_multibyte_character() {
        // Two-byte 'é' straddles the 200-byte cut
        let text = format!("{}é{}", "a".repeat(199), "b".repeat(50));
        let preview = text_preview(&text);
        assert_eq!(preview.len(), 199);
        assert!(preview.chars().all(|c| c == 'a'));

        // Four-byte emoji spanning bytes 198..202
        let text = format!("{}🦀{}", "a".repeat(198), "b".repeat(50));
        assert_eq!(text_preview(&text).len(), 198);

        // Entirely multi-byte input
        let text = "é".repeat(150);
        let preview = text_preview(&text);
        assert!(preview.len() <= 200);
        assert!(text.is_char_boundary(preview.len()));
    }
}
