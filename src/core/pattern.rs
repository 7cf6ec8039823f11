//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 digits:
//! - 0 = Absent (letter not in word)
//! - 1 = Present (letter in word, wrong position)
//! - 2 = Correct (letter in correct position)
//!
//! Position `i` contributes `digit × 3^i` to the code. Boards are at most
//! seven letters wide, so every code fits in a `u16` (3^7 = 2187). The width
//! is stored alongside the code so patterns of different widths never compare
//! equal.

use super::Word;
use super::word::MAX_WORD_LENGTH;
use std::fmt;

/// Feedback for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    Absent,
    Present,
    Correct,
}

impl Feedback {
    #[inline]
    const fn digit(self) -> u16 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    #[inline]
    const fn from_digit(digit: u16) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }

    /// Parse a single feedback symbol
    ///
    /// Letters G/Y/B (any case), `-`, `_`, `x`, `.` and the square emoji are
    /// accepted.
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            'B' | 'b' | '-' | '_' | 'x' | 'X' | '.' | '⬜' | '⬛' => Some(Self::Absent),
            _ => None,
        }
    }

    /// Single-letter symbol used by `Display`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Absent => 'B',
            Self::Present => 'Y',
            Self::Correct => 'G',
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Present => '🟨',
            Self::Correct => '🟩',
        }
    }
}

/// Feedback pattern for one guess against one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    len: u8,
    code: u16,
}

impl Pattern {
    /// Build a pattern from per-tile feedback
    ///
    /// Returns `None` if more than seven tiles are given.
    #[must_use]
    pub fn from_feedback(tiles: &[Feedback]) -> Option<Self> {
        if tiles.len() > MAX_WORD_LENGTH {
            return None;
        }
        let mut code = 0u16;
        let mut multiplier = 1u16;
        for tile in tiles {
            code += tile.digit() * multiplier;
            multiplier *= 3;
        }
        Some(Self {
            len: tiles.len() as u8,
            code,
        })
    }

    /// A pattern of `len` Absent tiles
    #[must_use]
    pub const fn all_absent(len: usize) -> Self {
        Self {
            len: len as u8,
            code: 0,
        }
    }

    /// A pattern of `len` Correct tiles
    #[must_use]
    pub const fn all_correct(len: usize) -> Self {
        let mut code = 0u16;
        let mut multiplier = 1u16;
        let mut i = 0;
        while i < len {
            code += 2 * multiplier;
            multiplier *= 3;
            i += 1;
        }
        Self {
            len: len as u8,
            code,
        }
    }

    /// Number of tiles
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Raw base-3 code
    #[inline]
    #[must_use]
    pub const fn code(self) -> u16 {
        self.code
    }

    /// Check if every tile is Correct
    #[inline]
    #[must_use]
    pub fn is_all_correct(self) -> bool {
        self == Self::all_correct(self.len())
    }

    /// Feedback at `position`
    ///
    /// Positions past the end read as Absent.
    #[must_use]
    pub fn feedback(self, position: usize) -> Feedback {
        if position >= self.len() {
            return Feedback::Absent;
        }
        Feedback::from_digit(self.code / 3u16.pow(position as u32) % 3)
    }

    /// Iterate tiles left to right
    pub fn iter(self) -> impl Iterator<Item = Feedback> {
        (0..self.len()).map(move |i| self.feedback(i))
    }

    /// Count tiles with the given feedback
    #[must_use]
    pub fn count(self, kind: Feedback) -> usize {
        self.iter().filter(|&f| f == kind).count()
    }

    /// Calculate the pattern when `guess` is played and `target` is the answer
    ///
    /// Greens are assigned first and consume letters from the target pool;
    /// yellows are then assigned left to right from what remains. If the two
    /// words differ in length the result is all Absent at the longer width.
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::core::{Feedback, Pattern, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let target = Word::new("rebus").unwrap();
    /// let pattern = Pattern::calculate(&guess, &target);
    ///
    /// assert_eq!(pattern.feedback(0), Feedback::Absent);
    /// assert_eq!(pattern.feedback(1), Feedback::Present);
    /// assert_eq!(pattern.feedback(4), Feedback::Present);
    /// assert_eq!(pattern.to_string(), "BYBBY");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        if guess.len() != target.len() {
            return Self::all_absent(guess.len().max(target.len()));
        }

        let g = guess.bytes();
        let t = target.bytes();
        let mut result = [Feedback::Absent; MAX_WORD_LENGTH];
        let mut available = [0u8; 26];
        for &ch in t {
            available[usize::from(ch - b'a')] += 1;
        }

        // Index needed to read both words and write result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..g.len() {
            if g[i] == t[i] {
                result[i] = Feedback::Correct;
                available[usize::from(g[i] - b'a')] -= 1;
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..g.len() {
            if result[i] == Feedback::Correct {
                continue;
            }
            let slot = &mut available[usize::from(g[i] - b'a')];
            if *slot > 0 {
                result[i] = Feedback::Present;
                *slot -= 1;
            }
        }

        let mut code = 0u16;
        let mut multiplier = 1u16;
        for tile in &result[..g.len()] {
            code += tile.digit() * multiplier;
            multiplier *= 3;
        }

        Self {
            len: g.len() as u8,
            code,
        }
    }

    /// Parse a pattern from a string like "GYB--" or "🟩🟨⬜⬜⬜"
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::core::Pattern;
    ///
    /// let p1 = Pattern::parse("GY-GY").unwrap();
    /// let p2 = Pattern::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// assert!(Pattern::parse("GQ").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let tiles = s
            .trim()
            .chars()
            .map(Feedback::from_symbol)
            .collect::<Option<Vec<_>>>()?;
        if tiles.is_empty() {
            return None;
        }
        Self::from_feedback(&tiles)
    }

    /// Convert to an emoji string such as "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.iter().map(Feedback::emoji).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in self.iter() {
            write!(f, "{}", tile.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid pattern string: {s}"))
    }
}
