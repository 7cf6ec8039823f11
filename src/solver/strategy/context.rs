//! Per-candidate-set scoring context
//!
//! Every table a scorer needs is derived once from the candidate set and
//! reused for every word scored against that version.

use crate::candidates::CandidateSet;
use crate::core::Word;
use crate::solver::metrics::{Partition, PartitionCache};
use crate::solver::tables::UsageTable;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// Binary entropy in bits; 0 at or outside the open interval (0, 1)
#[must_use]
pub fn binary_entropy(p: f64) -> f64 {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
}

/// N-gram and boundary counts over the candidate set
#[derive(Debug, Clone, Default)]
pub(crate) struct PatternTables {
    pub bigrams: FxHashMap<(usize, [u8; 2]), u32>,
    pub trigrams: FxHashMap<(usize, [u8; 3]), u32>,
    pub start2: FxHashMap<Box<[u8]>, u32>,
    pub end2: FxHashMap<Box<[u8]>, u32>,
    pub prefixes: FxHashMap<Box<[u8]>, u32>,
    pub suffixes: FxHashMap<Box<[u8]>, u32>,
}

impl PatternTables {
    fn build(words: &[Word]) -> Self {
        let mut tables = Self::default();
        for word in words {
            let b = word.bytes();
            for (i, pair) in b.windows(2).enumerate() {
                *tables.bigrams.entry((i, [pair[0], pair[1]])).or_default() += 1;
            }
            for (i, triple) in b.windows(3).enumerate() {
                *tables
                    .trigrams
                    .entry((i, [triple[0], triple[1], triple[2]]))
                    .or_default() += 1;
            }
            let affix = affix_len(b.len());
            *tables.start2.entry(head(b, 2).into()).or_default() += 1;
            *tables.end2.entry(tail(b, 2).into()).or_default() += 1;
            *tables.prefixes.entry(head(b, affix).into()).or_default() += 1;
            *tables.suffixes.entry(tail(b, affix).into()).or_default() += 1;
        }
        tables
    }
}

pub(crate) const fn affix_len(len: usize) -> usize {
    if len < 3 { len } else { 3 }
}

pub(crate) fn head(bytes: &[u8], n: usize) -> &[u8] {
    &bytes[..n.min(bytes.len())]
}

pub(crate) fn tail(bytes: &[u8], n: usize) -> &[u8] {
    &bytes[bytes.len().saturating_sub(n)..]
}

/// Shared inputs for every strategy, built once per candidate-set version
#[derive(Debug, Clone)]
pub struct ScoringContext {
    candidates: CandidateSet,
    usage: Arc<UsageTable>,
    cache: PartitionCache,
    locked_positions: Vec<Option<u8>>,
    /// Candidates containing each letter at least once
    letter_counts: [u32; 26],
    /// `letter_counts / max(n, 1)`
    presence: [f64; 26],
    /// Binary entropy of each presence probability
    letter_info: [f64; 26],
    /// Occurrences of each letter at each position
    positional: Vec<[u32; 26]>,
    pub(crate) patterns: PatternTables,
}

impl ScoringContext {
    /// Precompute every table for `candidates`
    ///
    /// `locked_positions` are the board's green letters; only the probe
    /// scorer reads them.
    #[must_use]
    pub fn build(
        candidates: CandidateSet,
        usage: Arc<UsageTable>,
        locked_positions: Vec<Option<u8>>,
    ) -> Self {
        Self::with_cache(candidates, usage, locked_positions, PartitionCache::new())
    }

    /// Like [`build`](Self::build) but sharing an existing partition cache
    #[must_use]
    pub fn with_cache(
        candidates: CandidateSet,
        usage: Arc<UsageTable>,
        locked_positions: Vec<Option<u8>>,
        cache: PartitionCache,
    ) -> Self {
        let words = candidates.words();
        let width = words.first().map_or(locked_positions.len(), Word::len);

        let mut letter_counts = [0u32; 26];
        let mut positional = vec![[0u32; 26]; width];
        for word in words {
            for letter in word.letters().iter() {
                letter_counts[usize::from(letter - b'a')] += 1;
            }
            for (slot, &letter) in positional.iter_mut().zip(word.bytes()) {
                slot[usize::from(letter - b'a')] += 1;
            }
        }

        let n = words.len().max(1) as f64;
        let presence = letter_counts.map(|c| f64::from(c) / n);
        let letter_info = presence.map(binary_entropy);
        let patterns = PatternTables::build(words);

        debug!(
            version = candidates.version(),
            candidates = words.len(),
            width,
            "built scoring context"
        );

        Self {
            candidates,
            usage,
            cache,
            locked_positions,
            letter_counts,
            presence,
            letter_info,
            positional,
            patterns,
        }
    }

    #[must_use]
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.candidates.version()
    }

    #[must_use]
    pub fn usage(&self) -> &UsageTable {
        &self.usage
    }

    #[must_use]
    pub const fn partition_cache(&self) -> &PartitionCache {
        &self.cache
    }

    #[must_use]
    pub fn locked_positions(&self) -> &[Option<u8>] {
        &self.locked_positions
    }

    /// Memoized partition of the candidate set by `guess`
    #[must_use]
    pub fn partition(&self, guess: &Word) -> Arc<Partition> {
        self.cache.get_or_compute(guess, &self.candidates)
    }

    /// Number of candidates containing `letter`
    #[must_use]
    pub fn letter_count(&self, letter: u8) -> u32 {
        self.letter_counts[usize::from(letter - b'a')]
    }

    /// Fraction of candidates containing `letter`
    #[must_use]
    pub fn presence(&self, letter: u8) -> f64 {
        self.presence[usize::from(letter - b'a')]
    }

    /// Information weight of testing `letter`
    #[must_use]
    pub fn letter_info(&self, letter: u8) -> f64 {
        self.letter_info[usize::from(letter - b'a')]
    }

    /// Candidates with `letter` at `position`; 0 outside the board
    #[must_use]
    pub fn positional_count(&self, position: usize, letter: u8) -> u32 {
        self.positional
            .get(position)
            .map_or(0, |slot| slot[usize::from(letter - b'a')])
    }

    /// `max(n, 1)`, the divisor for positional frequencies
    #[must_use]
    pub fn denom(&self) -> f64 {
        self.candidates.len().max(1) as f64
    }
}
