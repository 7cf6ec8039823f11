//! Letter-level scorers
//!
//! These look only at which letters a word contains, never at where the
//! candidates place them.

use super::ScoringContext;
use crate::core::Word;
use crate::solver::tables::{contingency, presence_count};

/// Penalty per repeated letter in the probe score
pub const DUPLICATE_PENALTY: f64 = 0.65;

/// Penalty per letter that re-tests an already locked green
pub const LOCKED_PENALTY: f64 = 0.25;

/// Sum of candidate counts for each distinct letter
pub fn frequency(word: &Word, ctx: &ScoringContext) -> f64 {
    word.letters()
        .iter()
        .map(|l| f64::from(ctx.letter_count(l)))
        .sum()
}

/// Sum of the global presence weights for each distinct letter
pub fn presence(word: &Word) -> f64 {
    word.letters()
        .iter()
        .map(|l| f64::from(presence_count(l)))
        .sum()
}

/// Pairwise co-occurrence over ordered pairs of distinct letters
pub fn contingency_score(word: &Word) -> f64 {
    let letters: Vec<u8> = word.unique_letters().collect();
    let mut score = 0.0;
    for (i, &first) in letters.iter().enumerate() {
        for (j, &second) in letters.iter().enumerate() {
            if i != j {
                score += f64::from(contingency(first, second));
            }
        }
    }
    score
}

/// Probe coverage: reward letters whose presence is uncertain
///
/// Each distinct letter contributes the binary entropy of its presence among
/// the candidates. Repeats and letters sitting on their own locked green
/// position are penalised, since they test nothing new.
pub fn coverage(word: &Word, ctx: &ScoringContext) -> f64 {
    let info: f64 = word.unique_letters().map(|l| ctx.letter_info(l)).sum();
    let duplicates = word.len() - word.unique_letter_count();

    let locked = ctx.locked_positions();
    let locked_hits = word
        .bytes()
        .iter()
        .enumerate()
        .filter(|&(i, &letter)| locked.get(i).copied().flatten() == Some(letter))
        .count();

    info - LOCKED_PENALTY * locked_hits as f64 - DUPLICATE_PENALTY * duplicates as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateSet;
    use crate::solver::tables::UsageTable;
    use std::sync::Arc;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn context(list: &[&str], locked: Vec<Option<u8>>) -> ScoringContext {
        let words: Vec<Word> = list.iter().map(|w| word(w)).collect();
        ScoringContext::build(
            CandidateSet::new(words, 1),
            Arc::new(UsageTable::empty()),
            locked,
        )
    }

    #[test]
    fn frequency_counts_each_letter_once() {
        let ctx = context(&["crane", "slate", "speed"], vec![None; 5]);
        // s:2 p:1 e:3 d:1
        assert!((frequency(&word("speed"), &ctx) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn presence_uses_global_weights() {
        // e 1056 + a 909 + t 667
        assert!((presence(&word("eat")) - 2632.0).abs() < f64::EPSILON);
        assert!((presence(&word("eee")) - 1056.0).abs() < f64::EPSILON);
    }

    #[test]
    fn contingency_sums_both_orders() {
        // a-e and e-a, both 362
        assert!((contingency_score(&word("aee")) - 724.0).abs() < f64::EPSILON);
        assert!(contingency_score(&word("zzz")).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_prefers_uncertain_letters() {
        // every candidate has A and E; half have S
        let ctx = context(&["stare", "blame", "snake", "grape"], vec![None; 5]);
        let uncertain = coverage(&word("shops"), &ctx);
        let certain = coverage(&word("aeaea"), &ctx);
        assert!(uncertain > certain);
    }

    #[test]
    fn coverage_penalties() {
        // E in every candidate, so its info weight is 0
        let ctx = context(&["crane", "slate"], vec![None, None, None, None, Some(b'e')]);
        let eerie = coverage(&word("eerie"), &ctx);
        // r and i: r in 1 of 2 (1 bit), i in none
        let expected = 1.0 - LOCKED_PENALTY - DUPLICATE_PENALTY * 2.0;
        assert!((eerie - expected).abs() < 1e-9);
    }
}
