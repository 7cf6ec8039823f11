//! Position-aware scorers
//!
//! All of these read the per-position letter table and the n-gram tables
//! held by [`ScoringContext`].

use super::ScoringContext;
use super::context::{affix_len, binary_entropy, head, tail};
use crate::core::{MAX_WORD_LENGTH, Word};
use rustc_hash::FxHashMap;

const VOWELS: &[u8] = b"aeiou";
const CLUSTERS: [&[u8]; 10] = [
    b"st", b"tr", b"pr", b"cr", b"br", b"gr", b"sp", b"ch", b"sh", b"th",
];
const ENDINGS: [&[u8]; 7] = [b"ed", b"er", b"ly", b"es", b"ng", b"nt", b"st"];

/// Key used for mismatched widths in the heuristic partition
const MISMATCH_KEY: u32 = u32::MAX;

/// Positional frequency, scaled to roughly the entropy range
///
/// Sums how many candidates share each letter in place, boosts by 10% per
/// distinct letter, then divides by the candidate count and multiplies by
/// the word length.
pub fn frequency(word: &Word, ctx: &ScoringContext) -> f64 {
    let raw: f64 = word
        .bytes()
        .iter()
        .enumerate()
        .map(|(i, &letter)| f64::from(ctx.positional_count(i, letter)))
        .sum();
    let boosted = raw * (1.0 + word.unique_letter_count() as f64 * 0.1);
    boosted / ctx.denom() * word.len() as f64
}

/// Per-position outcome key for the cheap entropy proxy
///
/// Four bits per position: 0 green, 1 miss, 2 yellow with no other target
/// position holding the letter, `3 + j` yellow pointing at target position
/// `j`. Yellows are assigned from the letters left over after greens.
fn heuristic_key(guess: &Word, target: &Word) -> u32 {
    if guess.len() != target.len() {
        return MISMATCH_KEY;
    }
    let g = guess.bytes();
    let t = target.bytes();
    let mut remaining = target.letter_counts();
    let mut codes = [None::<u32>; MAX_WORD_LENGTH];

    // Index needed to read both words and write codes[i]
    #[allow(clippy::needless_range_loop)]
    for i in 0..g.len() {
        if g[i] == t[i] {
            codes[i] = Some(0);
            remaining[usize::from(g[i] - b'a')] -= 1;
        }
    }

    #[allow(clippy::needless_range_loop)]
    for i in 0..g.len() {
        if codes[i].is_some() {
            continue;
        }
        let slot = &mut remaining[usize::from(g[i] - b'a')];
        codes[i] = Some(if *slot > 0 {
            *slot -= 1;
            t.iter()
                .enumerate()
                .position(|(j, &c)| c == g[i] && j != i)
                .map_or(2, |j| 3 + j as u32)
        } else {
            1
        });
    }

    codes[..g.len()]
        .iter()
        .enumerate()
        .fold(0, |key, (i, code)| key | (code.unwrap_or(1) << (4 * i)))
}

/// Heuristic positional entropy
///
/// Entropy of the candidate split under [`heuristic_key`], multiplied by a
/// bonus of 0.2 × the positional frequency of every letter that appears in
/// place among the candidates.
pub fn entropy_heuristic(word: &Word, ctx: &ScoringContext) -> f64 {
    let candidates = ctx.candidates().words();
    let mut buckets: FxHashMap<u32, usize> = FxHashMap::default();
    for target in candidates {
        *buckets.entry(heuristic_key(word, target)).or_default() += 1;
    }

    let total = candidates.len() as f64;
    let entropy: f64 = buckets
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    let commonality: f64 = word
        .bytes()
        .iter()
        .enumerate()
        .map(|(i, &letter)| ctx.positional_count(i, letter))
        .filter(|&count| count > 0)
        .map(|count| f64::from(count) / ctx.denom() * 0.2)
        .sum();

    entropy * (1.0 + commonality)
}

/// N-gram and boundary pattern score
pub fn pattern(word: &Word, ctx: &ScoringContext) -> f64 {
    let tables = &ctx.patterns;
    let b = word.bytes();

    let bigram: u32 = b
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            tables
                .bigrams
                .get(&(i, [pair[0], pair[1]]))
                .copied()
                .unwrap_or(0)
        })
        .sum();
    let trigram: u32 = b
        .windows(3)
        .enumerate()
        .map(|(i, t)| {
            tables
                .trigrams
                .get(&(i, [t[0], t[1], t[2]]))
                .copied()
                .unwrap_or(0)
        })
        .sum();
    // Adjacent-letter transitions are counted exactly like positional bigrams
    let transition = bigram;

    let lookup = |map: &FxHashMap<Box<[u8]>, u32>, key: &[u8]| {
        f64::from(map.get(key).copied().unwrap_or(0))
    };
    let affix = affix_len(b.len());
    let boundary = lookup(&tables.start2, head(b, 2)) * 2.0
        + lookup(&tables.end2, tail(b, 2)) * 2.0
        + lookup(&tables.prefixes, head(b, affix)) * 1.5
        + lookup(&tables.suffixes, tail(b, affix)) * 1.5;

    f64::from(bigram) * 0.3 + f64::from(trigram) * 0.2 + f64::from(transition) * 0.3 + boundary * 0.2
}

fn position_weight(i: usize, len: usize) -> f64 {
    if i == 0 || i + 1 == len {
        1.5
    } else if i == 1 || i + 2 == len {
        0.8
    } else {
        1.0
    }
}

fn letter_position_score(frequency: f64) -> f64 {
    let discrimination = (0.5 - frequency).abs() * 2.0;
    frequency * 100.0 + binary_entropy(frequency) * 50.0 + (1.0 - discrimination) * 30.0
}

/// Bonus for vowel spread, leading or trailing consonant clusters and
/// common endings
fn strategic_bonus(word: &Word) -> f64 {
    let b = word.bytes();
    let len = b.len();
    let mut bonus = 0.0;

    let vowels: Vec<usize> = b
        .iter()
        .enumerate()
        .filter(|&(_, c)| VOWELS.contains(c))
        .map(|(i, _)| i)
        .collect();
    if let (Some(&first), Some(&last)) = (vowels.first(), vowels.last())
        && vowels.len() >= 2
        && last - first >= 2
    {
        bonus += 20.0;
    }

    for (i, pair) in b.windows(2).enumerate() {
        if CLUSTERS.contains(&pair) {
            if i == 0 {
                bonus += 15.0;
            }
            if i + 2 == len {
                bonus += 10.0;
            }
        }
    }

    if ENDINGS.contains(&tail(b, 2)) {
        bonus += 15.0;
    }
    bonus
}

/// Discrimination-weighted positional score
pub fn weight(word: &Word, ctx: &ScoringContext) -> f64 {
    let len = word.len();
    let mut score = 0.0;
    let mut diversity = 0.0;

    for (i, &letter) in word.bytes().iter().enumerate() {
        let f = f64::from(ctx.positional_count(i, letter)) / ctx.denom();
        score += letter_position_score(f) * position_weight(i, len);
        if f > 0.1 && f < 0.4 {
            diversity += 0.1;
        }
    }

    score * (1.0 + diversity) + strategic_bonus(word)
}
