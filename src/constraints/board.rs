//! Board rows and row confirmation
//!
//! A row only feeds the constraint resolver once it is confirmed: every tile
//! holds a letter and the user either set a feedback colour on some tile or
//! explicitly confirmed the row. Typing alone never narrows the candidates.

use crate::core::{Feedback, LetterSet, Pattern, Word};
use crate::error::{AdvisorError, Result};
use std::str::FromStr;

/// One row of the board as the user has entered it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardRow {
    letters: String,
    tiles: Vec<Option<Feedback>>,
    confirmed: bool,
}

impl BoardRow {
    /// A row with typed letters and no feedback
    #[must_use]
    pub fn typed(letters: &str) -> Self {
        let letters = letters.trim().to_ascii_lowercase();
        let tiles = vec![None; letters.chars().count()];
        Self {
            letters,
            tiles,
            confirmed: false,
        }
    }

    /// A row with every tile coloured from `pattern`
    #[must_use]
    pub fn with_pattern(letters: &str, pattern: Pattern) -> Self {
        let mut row = Self::typed(letters);
        for (i, tile) in row.tiles.iter_mut().enumerate() {
            *tile = Some(pattern.feedback(i));
        }
        row
    }

    /// Replace the typed letters
    ///
    /// Editing a row drops any earlier confirmation and colours.
    pub fn set_letters(&mut self, letters: &str) {
        *self = Self::typed(letters);
    }

    /// Colour a single tile; out-of-range positions are ignored
    pub fn set_feedback(&mut self, position: usize, feedback: Feedback) {
        if let Some(tile) = self.tiles.get_mut(position) {
            *tile = Some(feedback);
        }
    }

    /// Mark the row as confirmed by the user
    pub const fn confirm(&mut self) {
        self.confirmed = true;
    }

    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// True if at least one tile carries an explicit colour
    #[must_use]
    pub fn has_feedback(&self) -> bool {
        self.tiles.iter().any(Option::is_some)
    }

    /// The row as a guess and its pattern, if it counts toward constraints
    ///
    /// Uncoloured tiles read as Absent.
    #[must_use]
    pub fn confirmed(&self, width: usize) -> Option<ConfirmedRow> {
        if !(self.confirmed || self.has_feedback()) {
            return None;
        }
        let guess = Word::with_length(&self.letters, width).ok()?;
        let tiles: Vec<Feedback> = self
            .tiles
            .iter()
            .map(|t| t.unwrap_or(Feedback::Absent))
            .collect();
        let pattern = Pattern::from_feedback(&tiles)?;
        Some(ConfirmedRow { guess, pattern })
    }
}

/// A completed guess with the feedback it received
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfirmedRow {
    pub guess: Word,
    pub pattern: Pattern,
}

impl ConfirmedRow {
    /// # Errors
    /// Returns `AdvisorError::Parse` if the pattern width differs from the guess.
    pub fn new(guess: Word, pattern: Pattern) -> Result<Self> {
        if guess.len() != pattern.len() {
            return Err(AdvisorError::Parse(format!(
                "pattern {pattern} does not match the width of {guess}"
            )));
        }
        Ok(Self { guess, pattern })
    }
}

impl FromStr for ConfirmedRow {
    type Err = AdvisorError;

    /// Parse `WORD:PATTERN`, for example `crane:BYBBG`
    fn from_str(s: &str) -> Result<Self> {
        let (word, pattern) = s
            .split_once(':')
            .ok_or_else(|| AdvisorError::Parse(format!("expected WORD:PATTERN, got {s}")))?;
        let guess = Word::new(word)?;
        let pattern = Pattern::parse(pattern)
            .ok_or_else(|| AdvisorError::Parse(format!("invalid pattern in {s}")))?;
        Self::new(guess, pattern)
    }
}

/// Letters seen on the board, grouped by colour
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLetterSets {
    /// Absent letters that are not also green or yellow elsewhere
    pub gray: LetterSet,
    pub yellow: LetterSet,
    pub green: LetterSet,
    /// Locked letter per position
    pub green_positions: Vec<Option<u8>>,
}

impl BoardLetterSets {
    /// Letters known to be in the answer
    #[must_use]
    pub const fn present(&self) -> LetterSet {
        self.yellow.union(self.green)
    }
}

/// The full board: a fixed width and any number of rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    rows: Vec<BoardRow>,
}

impl Board {
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Build a board from already-confirmed guesses
    #[must_use]
    pub fn from_confirmed(width: usize, rows: &[ConfirmedRow]) -> Self {
        let mut board = Self::new(width);
        for row in rows {
            board.push(BoardRow::with_pattern(row.guess.text(), row.pattern));
        }
        board
    }

    pub fn push(&mut self, row: BoardRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [BoardRow] {
        &mut self.rows
    }

    /// Confirmed rows in board order
    #[must_use]
    pub fn confirmed_rows(&self) -> Vec<ConfirmedRow> {
        self.rows
            .iter()
            .filter_map(|row| row.confirmed(self.width))
            .collect()
    }

    /// Words already played on confirmed rows
    #[must_use]
    pub fn guessed_words(&self) -> Vec<Word> {
        self.confirmed_rows().into_iter().map(|r| r.guess).collect()
    }

    /// Group confirmed letters by colour
    ///
    /// Gray letters that also appear green or yellow somewhere are dropped,
    /// since a surplus copy of a present letter is reported Absent.
    #[must_use]
    pub fn letter_sets(&self) -> BoardLetterSets {
        let mut sets = BoardLetterSets {
            green_positions: vec![None; self.width],
            ..BoardLetterSets::default()
        };

        for row in self.confirmed_rows() {
            let tiles = row.guess.bytes().iter().zip(row.pattern.iter());
            for (i, (&letter, feedback)) in tiles.enumerate() {
                match feedback {
                    Feedback::Correct => {
                        sets.green.insert(letter);
                        sets.green_positions[i] = Some(letter);
                    }
                    Feedback::Present => sets.yellow.insert(letter),
                    Feedback::Absent => sets.gray.insert(letter),
                }
            }
        }

        sets.gray = sets.gray.difference(sets.present());
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_rows_are_not_confirmed() {
        let row = BoardRow::typed("crane");
        assert!(row.confirmed(5).is_none());
    }

    #[test]
    fn explicit_confirmation_counts_as_all_absent() {
        let mut row = BoardRow::typed("crane");
        row.confirm();
        let confirmed = row.confirmed(5).unwrap();
        assert_eq!(confirmed.pattern, Pattern::all_absent(5));
    }

    #[test]
    fn any_colour_confirms_complete_row() {
        let mut row = BoardRow::typed("crane");
        row.set_feedback(2, Feedback::Correct);
        let confirmed = row.confirmed(5).unwrap();
        assert_eq!(confirmed.pattern.to_string(), "BBGBB");
    }

    #[test]
    fn incomplete_rows_never_confirm() {
        let mut row = BoardRow::typed("cra");
        row.set_feedback(0, Feedback::Present);
        row.confirm();
        assert!(row.confirmed(5).is_none());
    }

    #[test]
    fn editing_drops_confirmation() {
        let mut row = BoardRow::typed("crane");
        row.confirm();
        row.set_letters("slate");
        assert!(row.confirmed(5).is_none());
    }

    #[test]
    fn parse_confirmed_row() {
        let row: ConfirmedRow = "Crane:BYBBG".parse().unwrap();
        assert_eq!(row.guess.text(), "crane");
        assert_eq!(row.pattern.to_string(), "BYBBG");

        assert!("crane".parse::<ConfirmedRow>().is_err());
        assert!("crane:BYB".parse::<ConfirmedRow>().is_err());
        assert!("cr4ne:BYBBG".parse::<ConfirmedRow>().is_err());
    }

    #[test]
    fn letter_sets_prune_grays_that_are_present() {
        // SPEED vs ABIDE: S P absent, first E yellow, surplus E absent, D yellow
        let board = Board::from_confirmed(5, &["speed:BBYBY".parse().unwrap()]);
        let sets = board.letter_sets();

        assert_eq!(sets.gray, LetterSet::from_text("sp"));
        assert_eq!(sets.yellow, LetterSet::from_text("ed"));
        assert!(sets.green.is_empty());
        assert_eq!(board.guessed_words().len(), 1);
    }

    #[test]
    fn green_positions_are_recorded() {
        let board = Board::from_confirmed(5, &["slate:GBBBG".parse().unwrap()]);
        let sets = board.letter_sets();
        assert_eq!(sets.green_positions[0], Some(b's'));
        assert_eq!(sets.green_positions[4], Some(b'e'));
        assert_eq!(sets.green_positions[1], None);
        assert_eq!(sets.present(), LetterSet::from_text("se"));
    }
}
