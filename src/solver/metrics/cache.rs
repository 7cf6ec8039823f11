//! Shared partition memo keyed by (guess, candidate-set version)

use super::Partition;
use crate::candidates::CandidateSet;
use crate::core::Word;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

#[derive(Debug, Default)]
struct Entries {
    version: u64,
    partitions: FxHashMap<Word, Arc<Partition>>,
}

/// Cloneable handle to a partition memo
///
/// The memo only ever holds partitions for one candidate-set version; seeing
/// a different version clears it.
#[derive(Debug, Clone, Default)]
pub struct PartitionCache {
    inner: Arc<Mutex<Entries>>,
}

impl PartitionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition of `candidates` by `guess`, computed at most once per version
    #[must_use]
    pub fn get_or_compute(&self, guess: &Word, candidates: &CandidateSet) -> Arc<Partition> {
        {
            let mut entries = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            if entries.version != candidates.version() {
                trace!(
                    old = entries.version,
                    new = candidates.version(),
                    "partition cache reset"
                );
                entries.partitions.clear();
                entries.version = candidates.version();
            }
            if let Some(hit) = entries.partitions.get(guess) {
                return Arc::clone(hit);
            }
        }

        let partition = Arc::new(Partition::compute(guess, candidates.words()));
        let mut entries = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.version == candidates.version() {
            entries
                .partitions
                .insert(guess.clone(), Arc::clone(&partition));
        }
        partition
    }

    /// Number of memoized partitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .partitions
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .partitions
            .clear();
    }
}
