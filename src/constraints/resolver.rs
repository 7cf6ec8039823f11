//! Constraint resolution and candidate filtering
//!
//! Confirmed board rows and free-text filters are folded into one
//! [`Constraint`], which is then applied to the full word pool.
//!
//! Confirmed rows are replayed through [`Pattern::calculate`], so duplicate
//! letters are handled exactly. The coarser gray / yellow / green checks still
//! run on top of that and carry the explicit-exclusion override: a letter the
//! user excludes by hand is never required, even if the board says otherwise.
//! When such an override is active the row replay is skipped, because it would
//! otherwise reject every word without that letter.

use super::board::{Board, ConfirmedRow};
use super::filters::FreeTextFilters;
use crate::core::{Feedback, LetterSet, Pattern, Word};
use tracing::info;

/// Everything known about the answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    width: usize,
    /// Letters shown Absent and never shown present
    pub excluded_letters: LetterSet,
    /// Letters shown Present somewhere
    pub present_letters: LetterSet,
    /// Letter locked at each position
    pub locked_positions: Vec<Option<u8>>,
    /// Letters shown Present at each position, so not allowed there
    pub forbidden_at_position: Vec<LetterSet>,
    pub rows: Vec<ConfirmedRow>,
    pub filters: FreeTextFilters,
}

impl Constraint {
    /// A constraint that admits every word of the given width
    #[must_use]
    pub fn unconstrained(width: usize) -> Self {
        Self {
            width,
            excluded_letters: LetterSet::EMPTY,
            present_letters: LetterSet::EMPTY,
            locked_positions: vec![None; width],
            forbidden_at_position: vec![LetterSet::EMPTY; width],
            rows: Vec::new(),
            filters: FreeTextFilters::default(),
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Letters shown Present or Correct anywhere
    #[must_use]
    pub fn required_letters(&self) -> LetterSet {
        self.locked_positions
            .iter()
            .flatten()
            .copied()
            .collect::<LetterSet>()
            .union(self.present_letters)
    }

    /// True if an explicit exclusion contradicts a board-derived requirement
    #[must_use]
    pub fn exclusion_overrides_board(&self) -> bool {
        self.filters.excluded().intersects(self.required_letters())
    }

    /// Check a single word against every component of the constraint
    #[must_use]
    pub fn admits(&self, word: &Word) -> bool {
        if word.len() != self.width {
            return false;
        }

        let excluded = self.filters.excluded();
        if word.letters().intersects(excluded) {
            return false;
        }

        match &self.filters.per_position {
            Some(positions) => {
                if !word
                    .bytes()
                    .iter()
                    .enumerate()
                    .all(|(i, &letter)| positions.allows(i, letter))
                {
                    return false;
                }
            }
            None => {
                let include = self.filters.include;
                if word.letters().intersection(include) != include {
                    return false;
                }
            }
        }

        if !self.exclusion_overrides_board()
            && !self
                .rows
                .iter()
                .all(|row| Pattern::calculate(&row.guess, word) == row.pattern)
        {
            return false;
        }

        let shielded = excluded.union(self.filters.include);
        let grays = self
            .excluded_letters
            .difference(shielded)
            .difference(self.required_letters());
        if word.letters().intersects(grays) {
            return false;
        }

        for (i, locked) in self.locked_positions.iter().enumerate() {
            if let Some(letter) = *locked
                && !excluded.contains(letter)
                && word.char_at(i) != letter
            {
                return false;
            }
        }

        let must_include = self.present_letters.difference(excluded);
        if word.letters().intersection(must_include) != must_include {
            return false;
        }

        self.forbidden_at_position
            .iter()
            .enumerate()
            .all(|(i, forbidden)| !forbidden.difference(excluded).contains(word.char_at(i)))
    }
}

/// Fold confirmed rows and free-text filters into a [`Constraint`]
#[must_use]
pub fn resolve_constraints(board: &Board, filters: &FreeTextFilters) -> Constraint {
    let sets = board.letter_sets();
    let mut constraint = Constraint::unconstrained(board.width());
    let rows = board.confirmed_rows();

    for row in &rows {
        let tiles = row.guess.bytes().iter().zip(row.pattern.iter());
        for (i, (&letter, feedback)) in tiles.enumerate() {
            if feedback == Feedback::Present {
                constraint.forbidden_at_position[i].insert(letter);
            }
        }
    }

    constraint.excluded_letters = sets.gray;
    constraint.present_letters = sets.yellow;
    constraint.locked_positions = sets.green_positions;
    constraint.rows = rows;
    constraint.filters = filters.clone();
    constraint
}

/// Keep the words of `pool` that satisfy `constraint`, preserving order
#[must_use]
pub fn filter_candidates(pool: &[Word], constraint: &Constraint) -> Vec<Word> {
    let filtered: Vec<Word> = pool
        .iter()
        .filter(|word| constraint.admits(word))
        .cloned()
        .collect();
    info!(
        pool = pool.len(),
        remaining = filtered.len(),
        rows = constraint.rows.len(),
        "filtered candidates"
    );
    filtered
}
