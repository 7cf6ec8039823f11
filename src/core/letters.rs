//! Compact letter sets
//!
//! Constraint bookkeeping works on the 26 lowercase ASCII letters only, so a
//! set of letters fits in the low 26 bits of a `u32`.

use std::fmt;

/// A set of lowercase ASCII letters stored as a bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    /// The empty set
    pub const EMPTY: Self = Self(0);

    #[inline]
    const fn bit(letter: u8) -> u32 {
        1 << (letter - b'a')
    }

    /// Build a set from the lowercase letters in `text`
    ///
    /// Anything outside `a..=z` (after lowercasing) is ignored, which is how
    /// free-text filter boxes are read.
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::core::LetterSet;
    ///
    /// let set = LetterSet::from_text("Ab-c1");
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(b'c'));
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        text.bytes()
            .map(|b| b.to_ascii_lowercase())
            .filter(u8::is_ascii_lowercase)
            .collect()
    }

    /// Insert a letter; non-letters are ignored
    #[inline]
    pub fn insert(&mut self, letter: u8) {
        if letter.is_ascii_lowercase() {
            self.0 |= Self::bit(letter);
        }
    }

    /// Remove a letter
    #[inline]
    pub fn remove(&mut self, letter: u8) {
        if letter.is_ascii_lowercase() {
            self.0 &= !Self::bit(letter);
        }
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, letter: u8) -> bool {
        letter.is_ascii_lowercase() && self.0 & Self::bit(letter) != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// True if the two sets share at least one letter
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterate letters in alphabetical order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (b'a'..=b'z').filter(move |&l| self.contains(l))
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter.to_ascii_uppercase() as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_ignores_non_letters() {
        let set = LetterSet::from_text("x Y,z9!");
        assert_eq!(set.len(), 3);
        assert!(set.contains(b'x'));
        assert!(set.contains(b'y'));
        assert!(set.contains(b'z'));
        assert!(!set.contains(b'9'));
    }

    #[test]
    fn set_operations() {
        let a = LetterSet::from_text("abc");
        let b = LetterSet::from_text("bcd");

        assert_eq!(a.union(b), LetterSet::from_text("abcd"));
        assert_eq!(a.intersection(b), LetterSet::from_text("bc"));
        assert_eq!(a.difference(b), LetterSet::from_text("a"));
        assert!(a.intersects(b));
        assert!(!a.intersects(LetterSet::from_text("xyz")));
    }

    #[test]
    fn insert_and_remove() {
        let mut set = LetterSet::EMPTY;
        set.insert(b'q');
        set.insert(b'Q');
        assert_eq!(set.len(), 1);
        set.remove(b'q');
        assert!(set.is_empty());
    }

    #[test]
    fn display_is_sorted_uppercase() {
        assert_eq!(LetterSet::from_text("zea").to_string(), "AEZ");
    }
}
