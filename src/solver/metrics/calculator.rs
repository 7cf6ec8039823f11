//! Shannon entropy and bundled guess metrics

use super::Partition;
use crate::core::Pattern;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Entropy, expected remaining and worst case for one guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessMetrics {
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Largest bucket (worst-case remaining candidates)
    pub max_partition: usize,
}

impl GuessMetrics {
    #[must_use]
    pub fn from_partition(partition: &Partition) -> Self {
        Self {
            entropy: partition.entropy(),
            expected_remaining: partition.expected_remaining(),
            max_partition: partition.minimax(),
        }
    }
}

/// Calculate Shannon entropy from a pattern distribution
///
/// H = -Σ p * log₂(p)
///
/// # Properties
/// - Returns 0.0 for a certain outcome (one pattern with p=1)
/// - Maximized for a uniform distribution
/// - Always in range [0, log₂(n)] for n patterns
#[must_use]
pub fn shannon_entropy<S: BuildHasher>(pattern_counts: &HashMap<Pattern, usize, S>) -> f64 {
    let total = pattern_counts.values().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    pattern_counts
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
