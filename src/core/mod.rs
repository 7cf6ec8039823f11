//! Core domain types
//!
//! Words, feedback patterns and letter sets. Everything here is pure and has
//! no dependencies beyond `thiserror`.

mod letters;
mod pattern;
mod word;

pub use letters::LetterSet;
pub use pattern::{Feedback, Pattern};
pub use word::{MAX_WORD_LENGTH, MIN_WORD_LENGTH, Word, WordError, clamp_word_length};
