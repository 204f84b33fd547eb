//! Splits document text into overlapping chunks for embedding.

/// A text chunk with source information.
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// The text content
    pub text: String,
    /// Source identifier (filename)
    pub source: String,
    /// Chunk index within the source
    pub chunk_index: usize,
}

/// Split text into chunks of at most `chunk_size` characters with
/// `chunk_overlap` characters of overlap between consecutive chunks.
///
/// Whitespace-only chunks are dropped. Offsets are measured in chars,
/// not bytes, so multi-byte text never splits inside a code point.
pub fn split_into_chunks(
    text: &str,
    source: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<TextChunk> {
    debug_assert!(chunk_overlap < chunk_size);

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    let step = chunk_size - chunk_overlap;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk_text: String = chars[start..end].iter().collect();

        if !chunk_text.trim().is_empty() {
            chunks.push(TextChunk {
                text: chunk_text,
                source: source.to_string(),
                chunk_index: chunks.len(),
            });
        }

        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_yields_single_chunk() {
        let chunks = split_into_chunks("hello world", "doc.txt", 500, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].source, "doc.txt");
        assert_eq!(chunks[0].chunk_index, 0);
    }

    #[test]
    fn chunks_overlap_and_cover_the_whole_text() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let chunks = split_into_chunks(&text, "doc.txt", 100, 20);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
        // Consecutive chunks share the overlap region.
        let first_tail: String = chunks[0].text.chars().skip(80).collect();
        let second_head: String = chunks[1].text.chars().take(20).collect();
        assert_eq!(first_tail, second_head);
        // The last chunk ends where the text ends.
        assert!(text.ends_with(chunks.last().unwrap().text.as_str()));
    }

    #[test]
    fn whitespace_only_text_yields_no_chunks() {
        let chunks = split_into_chunks("   \n\t  ", "doc.txt", 100, 10);
        assert!(chunks.is_empty());
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "日本語のテキスト".repeat(40);
        let chunks = split_into_chunks(&text, "doc.txt", 100, 10);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
    }
}
