//! Text chunking for large documents

/// Default chunk budget in characters, well inside common model context windows
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 15_000;

/// Splits document text into word-aligned chunks of bounded size
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Chunk the given text
    ///
    /// Text that fits the budget comes back as a single chunk equal to the
    /// trimmed input. Longer text is packed greedily word by word; a word that
    /// alone exceeds the budget becomes its own oversized chunk.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        if text.chars().count() <= self.max_chunk_size {
            return vec![text.to_string()];
        }

        self.pack_words(text)
    }

    /// Greedy word packing
    ///
    /// The running length counts one separator per packed word, so it is
    /// always the joined length plus one.
    fn pack_words(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            if current_len + word_len > self.max_chunk_size && !current.is_empty() {
                chunks.push(current.join(" "));
                current.clear();
                current.push(word);
                current_len = word_len + 1;
            } else {
                current.push(word);
                current_len += word_len + 1;
            }
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }

        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_SIZE)
    }
}
