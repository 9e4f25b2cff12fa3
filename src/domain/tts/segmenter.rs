/// Separator used between paragraphs, both when splitting the input and
/// when rejoining paragraphs inside a chunk buffer
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A bounded-length contiguous slice of the input text, tagged with its
/// position in the original ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

/// Split text into chunks of at most `max_length` characters, preferring
/// paragraph boundaries, then sentence boundaries.
///
/// Three-tier fallback:
/// 1. Paragraphs (blank-line boundaries) are accumulated into a buffer and
///    flushed when the next paragraph would not fit.
/// 2. A paragraph that is itself longer than `max_length` is split into
///    sentences (after `.`, `!` or `?` followed by whitespace) and the
///    sentences are accumulated with the same overflow rule.
/// 3. A single sentence longer than `max_length` is emitted verbatim as an
///    oversized chunk. Backends tolerate a short overflow better than a
///    mid-word cut, so no character-level split happens.
///
/// Deterministic and pure; empty or whitespace-only input yields no chunks.
pub fn segment(text: &str, max_length: usize) -> Vec<Chunk> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        // Would appending this paragraph (plus a separator) overflow?
        if buffer.len() + paragraph.len() + PARAGRAPH_SEPARATOR.len() > max_length {
            flush(&mut chunks, &mut buffer);

            if paragraph.len() > max_length {
                split_paragraph_into_sentences(paragraph, max_length, &mut chunks);
            } else {
                // The paragraph fits on its own: it seeds the next buffer,
                // more paragraphs may still be appended to it
                buffer.push_str(paragraph);
                buffer.push_str(PARAGRAPH_SEPARATOR);
            }
        } else {
            buffer.push_str(paragraph);
            buffer.push_str(PARAGRAPH_SEPARATOR);
        }
    }

    flush(&mut chunks, &mut buffer);

    chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk { index, text })
        .collect()
}

/// Flush the buffer as a completed chunk, trimmed of surrounding whitespace.
/// Whitespace-only buffers produce no chunk.
fn flush(chunks: &mut Vec<String>, buffer: &mut String) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    buffer.clear();
}

/// Sentence-level fallback for a paragraph that exceeds `max_length` on its
/// own. Sentences are joined with a single space.
fn split_paragraph_into_sentences(paragraph: &str, max_length: usize, chunks: &mut Vec<String>) {
    let mut buffer = String::new();

    for sentence in split_sentences(paragraph) {
        if buffer.len() + sentence.len() + 1 > max_length {
            flush(chunks, &mut buffer);
            // An irreducible sentence longer than max_length lands here and
            // is flushed oversized on the next overflow (or at the end)
            buffer.push_str(sentence);
        } else {
            buffer.push_str(sentence);
            buffer.push(' ');
        }
    }

    flush(chunks, &mut buffer);
}

/// Split a paragraph at sentence boundaries: `.`, `!` or `?` (possibly
/// repeated) followed by whitespace. The boundary whitespace is dropped.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let boundary = regex::Regex::new(r"[.!?]+\s+").unwrap();

    let mut sentences = Vec::new();
    let mut last_end = 0;

    for mat in boundary.find_iter(paragraph) {
        sentences.push(paragraph[last_end..mat.end()].trim_end());
        last_end = mat.end();
    }

    if last_end < paragraph.len() {
        let tail = paragraph[last_end..].trim_end();
        if !tail.is_empty() {
            sentences.push(tail);
        }
    }

    sentences
}
