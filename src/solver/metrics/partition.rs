//! Grouping candidates by feedback pattern

use crate::core::{Pattern, Word};
use rustc_hash::FxHashMap;

/// Candidate counts per pattern for one guess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    buckets: FxHashMap<Pattern, usize>,
    total: usize,
}

impl Partition {
    /// Group `candidates` by the pattern `guess` produces against each
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::core::Word;
    /// use wordle_advisor::solver::metrics::Partition;
    ///
    /// // ABOUT and ABBOT both answer ABIDE with GGBBB
    /// let words: Vec<Word> = ["abide", "about", "abbot"]
    ///     .iter()
    ///     .map(|w| Word::new(w).unwrap())
    ///     .collect();
    /// let partition = Partition::compute(&words[0], &words);
    ///
    /// assert_eq!(partition.total(), 3);
    /// assert_eq!(partition.bucket_count(), 2);
    /// assert!((partition.entropy() - 0.918).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn compute(guess: &Word, candidates: &[Word]) -> Self {
        let mut buckets = FxHashMap::default();
        for candidate in candidates {
            *buckets
                .entry(Pattern::calculate(guess, candidate))
                .or_insert(0) += 1;
        }
        Self {
            buckets,
            total: candidates.len(),
        }
    }

    /// Number of candidates partitioned
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of non-empty buckets
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Candidates that would produce `pattern`
    #[must_use]
    pub fn count(&self, pattern: Pattern) -> usize {
        self.buckets.get(&pattern).copied().unwrap_or(0)
    }

    /// Bucket sizes in no particular order
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pattern, usize)> + '_ {
        self.buckets.iter().map(|(&p, &c)| (p, c))
    }

    /// Shannon entropy of the bucket distribution in bits (higher is better)
    #[must_use]
    pub fn entropy(&self) -> f64 {
        super::shannon_entropy(&self.buckets)
    }

    /// Expected candidates left after the guess, Σ count² / n (lower is better)
    #[must_use]
    pub fn expected_remaining(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self.total as f64;
        self.sizes()
            .map(|count| {
                let count = count as f64;
                count * count / n
            })
            .sum()
    }

    /// Largest bucket, the worst case after the guess (lower is better)
    #[must_use]
    pub fn minimax(&self) -> usize {
        self.sizes().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn abide_about_above() {
        let candidates = words(&["abide", "about", "above"]);
        let partition = Partition::compute(&candidates[0], &candidates);

        // one all-correct bucket, the other two sum to 2
        assert_eq!(partition.count(Pattern::all_correct(5)), 1);
        assert_eq!(partition.total(), 3);
        assert_eq!(partition.sizes().sum::<usize>() - 1, 2);
        // ABOUT gives GGBBB, ABOVE keeps its final E green
        assert_eq!(partition.count("GGBBB".parse().unwrap()), 1);
        assert_eq!(partition.count("GGBBG".parse().unwrap()), 1);
        assert!((partition.entropy() - 3.0f64.log2()).abs() < 1e-9);
    }

    #[test]
    fn one_third_two_thirds_split() {
        let candidates = words(&["abide", "about", "abbot"]);
        let partition = Partition::compute(&candidates[0], &candidates);
        assert_eq!(partition.count("GGBBB".parse().unwrap()), 2);

        let expected = -((1.0f64 / 3.0) * (1.0f64 / 3.0).log2()
            + (2.0f64 / 3.0) * (2.0f64 / 3.0).log2());
        assert!((partition.entropy() - expected).abs() < 1e-9);
        assert!((partition.entropy() - 0.918).abs() < 0.001);
    }

    #[test]
    fn perfect_split() {
        let candidates = words(&["slate", "zzzzz"]);
        let partition = Partition::compute(&Word::new("slate").unwrap(), &candidates);
        assert_eq!(partition.bucket_count(), 2);
        assert!((partition.entropy() - 1.0).abs() < 1e-9);
        assert!((partition.expected_remaining() - 1.0).abs() < 1e-9);
        assert_eq!(partition.minimax(), 1);
    }

    #[test]
    fn single_bucket() {
        let candidates = words(&["aaaaa", "bbbbb", "ccccc"]);
        let partition = Partition::compute(&Word::new("zzzzz").unwrap(), &candidates);
        assert_eq!(partition.bucket_count(), 1);
        assert!(partition.entropy().abs() < 1e-9);
        assert!((partition.expected_remaining() - 3.0).abs() < 1e-9);
        assert_eq!(partition.minimax(), 3);
    }

    #[test]
    fn empty_candidates() {
        let partition = Partition::compute(&Word::new("crane").unwrap(), &[]);
        assert_eq!(partition.total(), 0);
        assert!(partition.entropy().abs() < f64::EPSILON);
        assert!(partition.expected_remaining().abs() < f64::EPSILON);
        assert_eq!(partition.minimax(), 0);
    }

    #[test]
    fn probe_guesses_partition_too() {
        // a non-candidate guess is scored the same way
        let candidates = words(&["irate", "crate", "grate"]);
        let partition = Partition::compute(&Word::new("cigar").unwrap(), &candidates);
        assert_eq!(partition.sizes().sum::<usize>(), 3);
        assert!(partition.bucket_count() >= 2);
    }
}
