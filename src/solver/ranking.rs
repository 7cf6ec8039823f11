//! Ranking helpers for scored word lists

use super::strategy::ScoredWord;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use strum::{Display, EnumIter, EnumString};

/// Bounded list of the best-scoring items, highest first
///
/// Ties keep insertion order. Once full, an item must strictly beat the
/// current minimum to get in.
#[derive(Debug, Clone)]
pub struct TopK<T> {
    k: usize,
    items: Vec<(f64, T)>,
}

impl<T> TopK<T> {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k.saturating_add(1).min(1024)),
        }
    }

    /// Offer an item; returns true if it was kept
    pub fn push(&mut self, score: f64, item: T) -> bool {
        if self.k == 0 {
            return false;
        }
        if self.items.len() >= self.k {
            match self.items.last() {
                Some((min, _)) if score > *min => {
                    self.items.pop();
                }
                _ => return false,
            }
        }
        let at = self.items.partition_point(|(s, _)| *s >= score);
        self.items.insert(at, (score, item));
        true
    }

    /// Lowest kept score
    #[must_use]
    pub fn min_score(&self) -> Option<f64> {
        self.items.last().map(|(s, _)| *s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(_, item)| item)
    }

    /// Items, highest score first
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_iter().map(|(_, item)| item).collect()
    }
}

/// Display order for a scored list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SortMode {
    #[default]
    Highest,
    Lowest,
    /// Closest to the median score first
    Median,
    /// Closest to the most common score first
    Mode,
}

fn median(scores: &[f64]) -> f64 {
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent score; the first to reach the top count wins ties
fn mode(scores: &[f64]) -> f64 {
    let mut counts: FxHashMap<u64, usize> = FxHashMap::default();
    let mut best = scores[0];
    let mut best_count = 0;
    for &score in scores {
        let count = counts.entry(score.to_bits()).or_default();
        *count += 1;
        if *count > best_count {
            best_count = *count;
            best = score;
        }
    }
    best
}

fn by_distance(words: &mut [ScoredWord], center: f64) {
    words.sort_by(|a, b| {
        (a.score - center)
            .abs()
            .partial_cmp(&(b.score - center).abs())
            .unwrap_or(Ordering::Equal)
    });
}

/// Sort a copy of `words` for display; the sort is stable
#[must_use]
pub fn sort_scores(words: &[ScoredWord], sort: SortMode) -> Vec<ScoredWord> {
    let mut sorted = words.to_vec();
    if sorted.is_empty() {
        return sorted;
    }
    match sort {
        SortMode::Highest => sorted.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortMode::Lowest => sorted.sort_by(|a, b| a.score.total_cmp(&b.score)),
        SortMode::Median => {
            let scores: Vec<f64> = words.iter().map(|w| w.score).collect();
            by_distance(&mut sorted, median(&scores));
        }
        SortMode::Mode => {
            let scores: Vec<f64> = words.iter().map(|w| w.score).collect();
            by_distance(&mut sorted, mode(&scores));
        }
    }
    sorted
}

/// Drop words with a repeated letter
///
/// If that would leave nothing, the list is returned unchanged.
#[must_use]
pub fn hide_double_letters(words: Vec<ScoredWord>) -> Vec<ScoredWord> {
    let filtered: Vec<ScoredWord> = words
        .iter()
        .filter(|w| !w.word.has_duplicate_letters())
        .cloned()
        .collect();
    if filtered.is_empty() { words } else { filtered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    fn scored(list: &[(&str, f64)]) -> Vec<ScoredWord> {
        list.iter()
            .map(|&(w, score)| ScoredWord {
                word: Word::new(w).unwrap(),
                score,
            })
            .collect()
    }

    fn texts(words: &[ScoredWord]) -> Vec<&str> {
        words.iter().map(|w| w.word.text()).collect()
    }

    #[test]
    fn top_k_keeps_best() {
        let mut top = TopK::new(3);
        for (i, score) in [5.0, 1.0, 7.0, 3.0, 7.0, 2.0].into_iter().enumerate() {
            top.push(score, i);
        }
        assert_eq!(top.len(), 3);
        assert_eq!(top.min_score(), Some(5.0));
        // ties keep insertion order
        assert_eq!(top.into_vec(), [2, 4, 0]);
    }

    #[test]
    fn top_k_rejects_equal_to_minimum_when_full() {
        let mut top = TopK::new(2);
        assert!(top.push(2.0, "a"));
        assert!(top.push(1.0, "b"));
        assert!(!top.push(1.0, "c"));
        assert!(top.push(1.5, "d"));
        assert_eq!(top.into_vec(), ["a", "d"]);
        assert!(!TopK::new(0).push(1.0, ()));
    }

    #[test]
    fn sort_highest_and_lowest() {
        let words = scored(&[("crane", 2.0), ("slate", 5.0), ("pious", 1.0)]);
        assert_eq!(texts(&sort_scores(&words, SortMode::Highest)), ["slate", "crane", "pious"]);
        assert_eq!(texts(&sort_scores(&words, SortMode::Lowest)), ["pious", "crane", "slate"]);
    }

    #[test]
    fn sort_by_median_distance() {
        // median of 1, 4, 6, 10 is 5
        let words = scored(&[("aaaaa", 10.0), ("bbbbb", 1.0), ("ccccc", 6.0), ("ddddd", 4.0)]);
        assert_eq!(
            texts(&sort_scores(&words, SortMode::Median)),
            ["ccccc", "ddddd", "bbbbb", "aaaaa"]
        );
    }

    #[test]
    fn sort_by_mode_distance() {
        let words = scored(&[("aaaaa", 9.0), ("bbbbb", 3.0), ("ccccc", 3.0), ("ddddd", 4.0)]);
        assert_eq!(
            texts(&sort_scores(&words, SortMode::Mode)),
            ["bbbbb", "ccccc", "ddddd", "aaaaa"]
        );
        assert!((mode(&[1.0, 2.0, 2.0, 1.0]) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sort_modes_parse() {
        assert_eq!("median".parse::<SortMode>().unwrap(), SortMode::Median);
        assert_eq!(SortMode::Highest.to_string(), "highest");
        assert!(sort_scores(&[], SortMode::Mode).is_empty());
    }

    #[test]
    fn hide_doubles_falls_back() {
        let words = scored(&[("speed", 1.0), ("crane", 2.0)]);
        assert_eq!(texts(&hide_double_letters(words)), ["crane"]);

        let words = scored(&[("speed", 1.0), ("geese", 2.0)]);
        assert_eq!(texts(&hide_double_letters(words)), ["speed", "geese"]);
    }
}
