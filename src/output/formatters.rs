//! Formatting utilities for terminal output

use crate::core::{Feedback, Pattern, Word};
use colored::Colorize;
use std::fmt::Write as _;

/// Render a guess as coloured tiles, one per letter
#[must_use]
pub fn colored_tiles(word: &Word, pattern: Pattern) -> String {
    word.bytes()
        .iter()
        .zip(pattern.iter())
        .map(|(&letter, feedback)| {
            let tile = format!(" {} ", letter.to_ascii_uppercase() as char);
            match feedback {
                Feedback::Correct => tile.black().on_green().to_string(),
                Feedback::Present => tile.black().on_yellow().to_string(),
                Feedback::Absent => tile.white().on_bright_black().to_string(),
            }
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Fixed-width score, keeping the sign column aligned
#[must_use]
pub fn format_score(score: f64) -> String {
    format!("{score:>9.3}")
}

/// Preview of a word list, `limit` words then a count of the rest
#[must_use]
pub fn word_preview(words: &[Word], limit: usize) -> String {
    let shown: Vec<&str> = words.iter().take(limit).map(Word::text).collect();
    let mut preview = shown.join(" ");
    if words.len() > limit {
        let _ = write!(preview, " … (+{})", words.len() - limit);
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full_and_overflow() {
        assert_eq!(create_progress_bar(100.0, 100.0, 4), "████");
        assert_eq!(create_progress_bar(250.0, 100.0, 4), "████");
        assert_eq!(create_progress_bar(1.0, 0.0, 2), "░░");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn preview_counts_the_rest() {
        let words: Vec<Word> = ["crane", "slate", "irate"]
            .iter()
            .map(|w| Word::new(w).unwrap())
            .collect();
        assert_eq!(word_preview(&words, 2), "crane slate … (+1)");
        assert_eq!(word_preview(&words, 5), "crane slate irate");
    }

    #[test]
    fn tiles_keep_letters() {
        colored::control::set_override(false);
        let word = Word::new("crane").unwrap();
        let tiles = colored_tiles(&word, Pattern::parse("GYBBB").unwrap());
        assert_eq!(tiles, " C  R  A  N  E ");
    }
}
