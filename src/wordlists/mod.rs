//! Word lists
//!
//! Answer pools, guess pools and usage counts are read from plain text files
//! supplied at runtime.

pub mod loader;

pub use loader::{load_usage, load_words, parse_usage, parse_words, words_from_slice};

use crate::core::Word;
use rustc_hash::FxHashSet;

/// Guess pool that is a superset of the answers
///
/// Answers missing from `guesses` are appended, so every candidate is also
/// a legal guess.
#[must_use]
pub fn merge_guess_pool(answers: &[Word], guesses: Vec<Word>) -> Vec<Word> {
    let mut seen: FxHashSet<Word> = guesses.iter().cloned().collect();
    let mut merged = guesses;
    for answer in answers {
        if seen.insert(answer.clone()) {
            merged.push(answer.clone());
        }
    }
    merged
}
