//! # Prompt Template Modules
//!
//! This module organizes all prompt templates used throughout the `studykit`
//! library. It is divided into sub-modules based on the agent the prompts serve.

pub mod analysis;
pub mod chat;
pub mod core;
pub mod flashcard;
pub mod planner;
pub mod quiz;

/// Clips text to a prompt budget without splitting a character.
///
/// The stored document keeps its full content; this only bounds what a single
/// prompt quotes from it.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::excerpt;

    #[test]
    fn excerpt_clips_long_text() {
        assert_eq!(excerpt("abcdef", 3), "abc");
    }

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("abc", 10), "abc");
    }

    #[test]
    fn excerpt_respects_multibyte_boundaries() {
        assert_eq!(excerpt("héllo", 2), "hé");
    }
}
