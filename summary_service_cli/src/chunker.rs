/// Splits `text` into consecutive slices of at most `size` characters.
///
/// Boundaries are counted in chars, not bytes, so multi-byte text is never cut
/// inside a code point. Words may still be split across two chunks.
pub fn chunk_text(text: &str, size: usize) -> Vec<&str> {
    assert!(size > 0, "chunk size must be positive");

    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHUNK_SIZE;

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", CHUNK_SIZE).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("Lorem ipsum dolor.", CHUNK_SIZE), vec!["Lorem ipsum dolor."]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let text = "a".repeat(2000);
        let chunks = chunk_text(&text, CHUNK_SIZE);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 1000));
    }

    #[test]
    fn chunk_count_bound_and_reconstruction() {
        for len in [1usize, 999, 1000, 1001, 2500, 4321] {
            let text: String = "çğıöşüabc ".chars().cycle().take(len).collect();
            let chunks = chunk_text(&text, CHUNK_SIZE);

            assert_eq!(chunks.len(), len.div_ceil(CHUNK_SIZE), "len {}", len);
            assert!(chunks.iter().all(|c| c.chars().count() <= CHUNK_SIZE));
            assert_eq!(chunks.concat(), text);
        }
    }

    #[test]
    fn last_chunk_may_be_shorter() {
        let chunks = chunk_text("abcdefg", 3);
        assert_eq!(chunks, vec!["abc", "def", "g"]);
    }
}
