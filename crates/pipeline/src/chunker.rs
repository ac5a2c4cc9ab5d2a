//! Sentence-aligned text chunking.

/// Default maximum chunk length in characters.
///
/// Sized to keep each chunk comfortably inside the generation service's
/// context window.
pub const DEFAULT_CHUNK_SIZE: usize = 30000;

/// Split text into chunks of at most `chunk_size` characters, aligned to
/// sentence boundaries.
///
/// Sentences are delimited by `". "`. They are accumulated into a chunk
/// until appending the next sentence (with its restored separator) would
/// reach `chunk_size`; the chunk is then sealed and a new one started. A
/// single sentence longer than `chunk_size` becomes its own oversized chunk
/// rather than being split mid-sentence. Lengths are counted in characters,
/// not bytes. Empty or whitespace-only input produces no chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in text.split(". ") {
        // Account for the ". " restored below
        let sentence_chars = sentence.chars().count() + 2;

        if current_chars > 0 && current_chars + sentence_chars >= chunk_size {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }

        current.push_str(sentence);
        current.push_str(". ");
        current_chars += sentence_chars;
    }

    if current_chars > 0 {
        chunks.push(current);
    }

    tracing::debug!(
        "Split {} characters into {} chunks (chunk size: {})",
        text.chars().count(),
        chunks.len(),
        chunk_size
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_produces_no_chunks() {
        assert!(chunk_text("", 100).is_empty());
        assert!(chunk_text("   \n\t", 100).is_empty());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunks = chunk_text("The quick brown fox. It jumped over the fence", 200);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "The quick brown fox. It jumped over the fence. ");
    }

    #[test]
    fn test_splits_on_sentence_boundaries() {
        // Each sentence is 10 characters with its restored separator
        let text = "aaaaaaaa. bbbbbbbb. cccccccc. dddddddd";
        let chunks = chunk_text(text, 25);

        assert_eq!(chunks, vec!["aaaaaaaa. bbbbbbbb. ", "cccccccc. dddddddd. "]);
        for chunk in &chunks {
            assert!(chunk.chars().count() < 25);
        }
    }

    #[test]
    fn test_chunks_reconstruct_input() {
        let text = "One sentence here. Another one there. And a third";
        let chunks = chunk_text(text, 25);

        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), format!("{}. ", text));
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let big = "x".repeat(100);
        let text = format!("small one. {}. tail", big);
        let chunks = chunk_text(&text, 50);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], format!("{}. ", big));
        assert!(chunks[1].chars().count() > 50);
    }

    #[test]
    fn test_lengths_counted_in_characters_not_bytes() {
        // Two-byte characters; byte counting would seal a chunk per sentence
        let sentence = "é".repeat(8);
        let text = format!("{s}. {s}. {s}", s = sentence);
        let chunks = chunk_text(&text, 25);

        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_order_preserved() {
        let text = (0..50)
            .map(|i| format!("sentence number {:03}", i))
            .collect::<Vec<_>>()
            .join(". ");
        let chunks = chunk_text(&text, 100);

        let rejoined = chunks.concat();
        let mut last_pos = 0;
        for i in 0..50 {
            let needle = format!("sentence number {:03}", i);
            let pos = rejoined[last_pos..]
                .find(&needle)
                .expect("sentence missing from chunks");
            last_pos += pos + needle.len();
        }
    }
}
