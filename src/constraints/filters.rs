//! Free-text letter filters
//!
//! These sit on top of board-derived constraints as independent hard rules.

use crate::core::LetterSet;

/// Per-position include / exclude letter sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionFilters {
    exclude: Vec<LetterSet>,
    include: Vec<LetterSet>,
}

impl PositionFilters {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            exclude: vec![LetterSet::EMPTY; width],
            include: vec![LetterSet::EMPTY; width],
        }
    }

    /// Forbid the letters in `text` at `position`
    #[must_use]
    pub fn exclude_at(mut self, position: usize, text: &str) -> Self {
        if let Some(set) = self.exclude.get_mut(position) {
            *set = set.union(LetterSet::from_text(text));
        }
        self
    }

    /// Restrict `position` to the letters in `text`
    #[must_use]
    pub fn include_at(mut self, position: usize, text: &str) -> Self {
        if let Some(set) = self.include.get_mut(position) {
            *set = set.union(LetterSet::from_text(text));
        }
        self
    }

    /// True if `letter` may sit at `position`
    ///
    /// An empty include set means any letter not excluded is allowed.
    #[must_use]
    pub fn allows(&self, position: usize, letter: u8) -> bool {
        if self
            .exclude
            .get(position)
            .is_some_and(|set| set.contains(letter))
        {
            return false;
        }
        self.include
            .get(position)
            .is_none_or(|set| set.is_empty() || set.contains(letter))
    }
}

/// User-entered letter filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeTextFilters {
    /// Letters the answer must not contain
    pub exclude: LetterSet,
    /// Sticky exclusions kept across board resets
    pub global_exclude: LetterSet,
    /// Letters the answer must contain (whole-word mode)
    pub include: LetterSet,
    /// When set, replaces the whole-word include filter
    pub per_position: Option<PositionFilters>,
}

impl FreeTextFilters {
    #[must_use]
    pub fn exclude(text: &str) -> Self {
        Self {
            exclude: LetterSet::from_text(text),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_include(mut self, text: &str) -> Self {
        self.include = self.include.union(LetterSet::from_text(text));
        self
    }

    #[must_use]
    pub fn with_global_exclude(mut self, text: &str) -> Self {
        self.global_exclude = self.global_exclude.union(LetterSet::from_text(text));
        self
    }

    #[must_use]
    pub fn with_positions(mut self, positions: PositionFilters) -> Self {
        self.per_position = Some(positions);
        self
    }

    /// Every explicitly excluded letter
    #[must_use]
    pub const fn excluded(&self) -> LetterSet {
        self.exclude.union(self.global_exclude)
    }

    /// Whole-word include letters, empty in per-position mode
    #[must_use]
    pub fn whole_word_include(&self) -> LetterSet {
        if self.per_position.is_some() {
            LetterSet::EMPTY
        } else {
            self.include
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded().is_empty() && self.include.is_empty() && self.per_position.is_none()
    }
}
