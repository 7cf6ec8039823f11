//! Hard-mode legality checks
//!
//! In hard mode every revealed green must stay in place and every revealed
//! letter must be reused. Absent letters are not enforced, matching the game.

use super::board::ConfirmedRow;
use crate::core::{Feedback, LetterSet, Word};

/// Accumulated hard-mode requirements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HardModeConstraints {
    /// Locked letter per position
    pub green_positions: Vec<Option<u8>>,
    /// Letters revealed Present at each position
    pub yellow_positions: Vec<LetterSet>,
    /// Minimum count of each letter, indexed by `letter - b'a'`
    pub min_counts: [u8; 26],
}

impl HardModeConstraints {
    /// Collect requirements from confirmed rows
    ///
    /// Minimum counts are the largest Correct+Present count any single row
    /// revealed for a letter, not the sum across rows.
    #[must_use]
    pub fn from_rows(rows: &[ConfirmedRow]) -> Self {
        let width = rows.iter().map(|r| r.guess.len()).max().unwrap_or(0);
        let mut constraints = Self {
            green_positions: vec![None; width],
            yellow_positions: vec![LetterSet::EMPTY; width],
            min_counts: [0; 26],
        };

        for row in rows {
            let mut row_counts = [0u8; 26];
            let tiles = row.guess.bytes().iter().zip(row.pattern.iter());
            for (i, (&letter, feedback)) in tiles.enumerate() {
                match feedback {
                    Feedback::Correct => constraints.green_positions[i] = Some(letter),
                    Feedback::Present => constraints.yellow_positions[i].insert(letter),
                    Feedback::Absent => continue,
                }
                row_counts[usize::from(letter - b'a')] += 1;
            }
            for (min, row) in constraints.min_counts.iter_mut().zip(row_counts) {
                *min = (*min).max(row);
            }
        }

        constraints
    }

    /// Require `letter` at `position`
    #[must_use]
    pub fn with_green(mut self, position: usize, letter: u8) -> Self {
        if self.green_positions.len() <= position {
            self.green_positions.resize(position + 1, None);
        }
        self.green_positions[position] = Some(letter.to_ascii_lowercase());
        self
    }

    /// Require at least `count` copies of `letter`
    #[must_use]
    pub fn with_min_count(mut self, letter: u8, count: u8) -> Self {
        let letter = letter.to_ascii_lowercase();
        if letter.is_ascii_lowercase() {
            self.min_counts[usize::from(letter - b'a')] = count;
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.green_positions.iter().all(Option::is_none)
            && self.yellow_positions.iter().all(|s| s.is_empty())
            && self.min_counts.iter().all(|&c| c == 0)
    }
}

/// Outcome of a hard-mode check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardModeVerdict {
    pub ok: bool,
    pub reasons: Vec<String>,
}

/// Check `guess` against hard-mode requirements
///
/// Never mutates `constraints`. A guess that is not `width` lowercase letters
/// fails with the single reason `invalid guess`.
///
/// # Examples
/// ```
/// use wordle_advisor::constraints::{HardModeConstraints, validate_hard_mode_guess};
///
/// let constraints = HardModeConstraints::default()
///     .with_green(0, b'a')
///     .with_min_count(b'a', 1);
/// let verdict = validate_hard_mode_guess("blast", 5, &constraints);
/// assert!(!verdict.ok);
/// assert_eq!(verdict.reasons, ["position 1 must be A"]);
/// ```
#[must_use]
pub fn validate_hard_mode_guess(
    guess: &str,
    width: usize,
    constraints: &HardModeConstraints,
) -> HardModeVerdict {
    let Ok(word) = Word::with_length(guess, width) else {
        return HardModeVerdict {
            ok: false,
            reasons: vec!["invalid guess".to_string()],
        };
    };

    let mut reasons = Vec::new();
    let letters = word.bytes();

    for (pos, locked) in constraints.green_positions.iter().enumerate() {
        if let Some(letter) = *locked
            && letters.get(pos) != Some(&letter)
        {
            reasons.push(format!(
                "position {} must be {}",
                pos + 1,
                letter.to_ascii_uppercase() as char
            ));
        }
    }

    for (pos, yellows) in constraints.yellow_positions.iter().enumerate() {
        if let Some(&letter) = letters.get(pos)
            && yellows.contains(letter)
        {
            reasons.push(format!(
                "position {} cannot be {}",
                pos + 1,
                letter.to_ascii_uppercase() as char
            ));
        }
    }

    let counts = word.letter_counts();
    for (idx, (&required, &actual)) in constraints.min_counts.iter().zip(&counts).enumerate() {
        if actual < required {
            let letter = (b'A' + idx as u8) as char;
            if required == 1 {
                reasons.push(format!("must include {letter}"));
            } else {
                reasons.push(format!("must include {letter} ×{required}"));
            }
        }
    }

    HardModeVerdict {
        ok: reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(list: &[&str]) -> Vec<ConfirmedRow> {
        list.iter().map(|r| r.parse().unwrap()).collect()
    }

    #[test]
    fn green_position_mismatch() {
        let constraints = HardModeConstraints::default()
            .with_green(0, b'a')
            .with_min_count(b'a', 1);
        let verdict = validate_hard_mode_guess("blast", 5, &constraints);
        assert!(!verdict.ok);
        assert_eq!(verdict.reasons, ["position 1 must be A"]);
    }

    #[test]
    fn yellow_reuse_and_position() {
        // CRANE: R yellow at position 2
        let constraints = HardModeConstraints::from_rows(&rows(&["crane:BYBBB"]));

        let verdict = validate_hard_mode_guess("frost", 5, &constraints);
        assert_eq!(verdict.reasons, ["position 2 cannot be R"]);

        let verdict = validate_hard_mode_guess("moist", 5, &constraints);
        assert_eq!(verdict.reasons, ["must include R"]);

        assert!(validate_hard_mode_guess("shirt", 5, &constraints).ok);
    }

    #[test]
    fn min_counts_are_per_row_maxima() {
        // two Es revealed in one row, one in another: minimum stays 2
        let constraints =
            HardModeConstraints::from_rows(&rows(&["geese:BYBBG", "eerie:YBBBB"]));
        assert_eq!(constraints.min_counts[usize::from(b'e' - b'a')], 2);

        let verdict = validate_hard_mode_guess("shine", 5, &constraints);
        assert!(verdict.reasons.contains(&"must include E ×2".to_string()));
    }

    #[test]
    fn absent_letters_are_not_enforced() {
        let constraints = HardModeConstraints::from_rows(&rows(&["crane:BBBBG"]));
        assert!(validate_hard_mode_guess("crate", 5, &constraints).ok);
    }

    #[test]
    fn invalid_guesses() {
        let constraints = HardModeConstraints::default();
        for guess in ["", "cat", "cr4ne", "cranes"] {
            let verdict = validate_hard_mode_guess(guess, 5, &constraints);
            assert!(!verdict.ok);
            assert_eq!(verdict.reasons, ["invalid guess"]);
        }
        assert!(validate_hard_mode_guess("CRANE", 5, &constraints).ok);
    }

    #[test]
    fn empty_constraints() {
        assert!(HardModeConstraints::default().is_empty());
        assert!(!HardModeConstraints::from_rows(&rows(&["crane:BBBBG"])).is_empty());
    }
}
