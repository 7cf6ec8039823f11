//! Versioned candidate sets
//!
//! A `CandidateSet` is an immutable snapshot of the words still consistent
//! with the board. Every replacement gets a fresh version, and every cache
//! downstream keys on that version rather than on the contents.

use crate::core::Word;
use std::sync::Arc;
use tracing::debug;

/// Immutable, cheaply cloneable snapshot of the current answer pool
#[derive(Debug, Clone)]
pub struct CandidateSet {
    words: Arc<[Word]>,
    version: u64,
}

impl CandidateSet {
    /// Build a standalone snapshot with an explicit version
    ///
    /// Sessions go through [`CandidateStore::set`]; this constructor is for
    /// one-off scoring where no store exists.
    #[must_use]
    pub fn new(words: impl Into<Arc<[Word]>>, version: u64) -> Self {
        Self {
            words: words.into(),
            version,
        }
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Shared handle to the words
    #[must_use]
    pub fn shared_words(&self) -> Arc<[Word]> {
        Arc::clone(&self.words)
    }

    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }
}

/// Owner of the active candidate set
///
/// Versions start at 1 and only ever increase, so a version seen once is
/// never handed out again.
#[derive(Debug)]
pub struct CandidateStore {
    current: CandidateSet,
    next_version: u64,
}

impl Default for CandidateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateStore {
    /// An empty store at version 0
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: CandidateSet::new(Vec::new(), 0),
            next_version: 1,
        }
    }

    /// Replace the active set and return its new version
    pub fn set(&mut self, words: impl Into<Arc<[Word]>>) -> u64 {
        let version = self.next_version;
        self.next_version += 1;
        self.current = CandidateSet::new(words, version);
        debug!(version, size = self.current.len(), "candidate set replaced");
        version
    }

    /// Snapshot of the active set
    #[must_use]
    pub fn get(&self) -> CandidateSet {
        self.current.clone()
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.current.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn versions_start_at_one_and_increase() {
        let mut store = CandidateStore::new();
        assert_eq!(store.version(), 0);
        assert!(store.get().is_empty());

        let v1 = store.set(words(&["crane", "slate"]));
        let v2 = store.set(words(&["crane", "slate"]));
        assert_eq!(v1, 1);
        assert_eq!(v2, 2);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn snapshots_survive_replacement() {
        let mut store = CandidateStore::new();
        store.set(words(&["crane"]));
        let old = store.get();
        store.set(words(&["slate", "irate"]));

        assert_eq!(old.len(), 1);
        assert_eq!(old.version(), 1);
        assert_eq!(store.get().len(), 2);
    }

    #[test]
    fn contains_checks_membership() {
        let set = CandidateSet::new(words(&["crane", "slate"]), 7);
        assert!(set.contains(&Word::new("slate").unwrap()));
        assert!(!set.contains(&Word::new("irate").unwrap()));
        assert_eq!(set.version(), 7);
    }
}
