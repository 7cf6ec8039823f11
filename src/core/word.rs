//! Dictionary word representation
//!
//! A Word stores a lowercase word of 3 to 7 letters together with the set of
//! letters it contains, so presence checks during filtering are a bit test.

use super::LetterSet;
use std::fmt;
use thiserror::Error;

/// Shortest supported board width
pub const MIN_WORD_LENGTH: usize = 3;

/// Longest supported board width
pub const MAX_WORD_LENGTH: usize = 7;

/// Clamp a requested board width into the supported range
#[must_use]
pub fn clamp_word_length(length: usize) -> usize {
    length.clamp(MIN_WORD_LENGTH, MAX_WORD_LENGTH)
}

/// A validated dictionary word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: Box<str>,
    letters: LetterSet,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be {MIN_WORD_LENGTH}-{MAX_WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("word must contain only the letters a-z")]
    InvalidCharacters,
    #[error("word must be exactly {expected} letters, got {found}")]
    LengthMismatch { expected: usize, found: usize },
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Input is trimmed and lowercased.
    ///
    /// # Errors
    /// Returns `WordError` if the length is outside 3..=7 or the word holds
    /// anything other than ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref().trim().to_ascii_lowercase();

        if !text.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&text.len()) {
            return Err(WordError::InvalidLength(text.len()));
        }

        let letters = text.bytes().collect();

        Ok(Self {
            text: text.into_boxed_str(),
            letters,
        })
    }

    /// Create a Word that must match a given board width
    ///
    /// # Errors
    /// Returns `WordError::LengthMismatch` when the word is valid but has the
    /// wrong length, or any error from [`Word::new`].
    pub fn with_length(text: impl AsRef<str>, length: usize) -> Result<Self, WordError> {
        let word = Self::new(text)?;
        if word.len() == length {
            Ok(word)
        } else {
            Err(WordError::LengthMismatch {
                expected: length,
                found: word.len(),
            })
        }
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false: a Word has at least three letters
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the letter at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.bytes()[position]
    }

    /// The set of distinct letters in this word
    #[inline]
    #[must_use]
    pub const fn letters(&self) -> LetterSet {
        self.letters
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub const fn has_letter(&self, letter: u8) -> bool {
        self.letters.contains(letter)
    }

    /// Number of distinct letters
    #[inline]
    #[must_use]
    pub const fn unique_letter_count(&self) -> usize {
        self.letters.len()
    }

    /// True if any letter appears more than once
    #[inline]
    #[must_use]
    pub fn has_duplicate_letters(&self) -> bool {
        self.letters.len() < self.len()
    }

    /// Distinct letters in first-occurrence order
    pub fn unique_letters(&self) -> impl Iterator<Item = u8> + '_ {
        let mut seen = LetterSet::EMPTY;
        self.bytes().iter().copied().filter(move |&l| {
            let fresh = !seen.contains(l);
            seen.insert(l);
            fresh
        })
    }

    /// Count of each letter, indexed by `letter - b'a'`
    #[inline]
    #[must_use]
    pub fn letter_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &ch in self.bytes() {
            counts[usize::from(ch - b'a')] += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
