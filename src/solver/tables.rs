//! Precomputed letter statistics and the external usage table
//!
//! The presence and co-occurrence tables describe the standard five-letter
//! answer list: how many answers contain each letter, and for each letter how
//! many answers containing it also contain every other letter. They are used
//! unchanged for other board widths.

use crate::core::Word;
use rustc_hash::FxHashMap;

/// Scale applied to normalized usage so it sits on the positional-frequency scale
pub const LANGUAGE_SCALE: f64 = 4.961;

/// Number of answers containing each letter, indexed by `letter - b'a'`
pub const LETTER_PRESENCE_COUNTS: [u16; 26] = [
    909, 267, 448, 370, 1056, 207, 300, 379, 647, 27, 202, 648, 298, 550, 673, 346, 29, 837, 618, 667, 457, 149, 194, 37, 417, 35,
];

/// `CONTINGENCY[a][b]`: answers containing letter `a` that also contain `b`
#[rustfmt::skip]
pub const CONTINGENCY: [[u16; 26]; 26] = [
    // a
    [70, 107, 179, 130, 362, 66, 110, 123, 142, 7, 83, 288, 124, 198, 151, 119, 12, 318, 224, 257, 76, 66, 59, 12, 144, 19],
    // b
    [107, 13, 29, 38, 119, 7, 25, 26, 62, 2, 17, 83, 26, 46, 82, 6, 1, 94, 35, 56, 62, 4, 9, 4, 41, 6],
    // c
    [179, 29, 29, 37, 171, 25, 13, 118, 115, 3, 68, 101, 49, 88, 125, 54, 2, 145, 85, 95, 90, 18, 20, 3, 43, 2],
    // d
    [130, 38, 37, 22, 179, 18, 42, 29, 123, 2, 8, 83, 32, 76, 109, 29, 1, 129, 38, 61, 71, 15, 33, 3, 82, 2],
    // e
    [362, 119, 171, 179, 172, 83, 131, 136, 232, 9, 65, 280, 114, 218, 209, 156, 13, 424, 256, 277, 140, 98, 86, 23, 97, 19],
    // f
    [66, 7, 25, 18, 83, 22, 15, 24, 71, 2, 17, 72, 11, 34, 51, 3, 0, 78, 32, 57, 40, 2, 9, 2, 37, 4],
    // g
    [110, 25, 13, 42, 131, 15, 11, 31, 98, 1, 4, 72, 28, 101, 84, 19, 0, 95, 39, 51, 73, 15, 16, 0, 47, 4],
    // h
    [123, 26, 118, 29, 136, 24, 31, 10, 87, 1, 26, 61, 38, 62, 98, 42, 2, 101, 114, 135, 68, 10, 40, 2, 49, 1],
    // i
    [142, 62, 115, 123, 232, 71, 98, 87, 24, 6, 46, 168, 75, 192, 91, 96, 11, 194, 147, 192, 63, 51, 45, 20, 85, 9],
    // j
    [7, 2, 3, 2, 9, 2, 1, 1, 6, 0, 2, 3, 3, 7, 12, 1, 0, 6, 2, 8, 10, 0, 1, 0, 9, 1],
    // k
    [83, 17, 68, 8, 65, 17, 4, 26, 46, 2, 8, 54, 12, 55, 39, 23, 5, 56, 69, 29, 35, 3, 13, 0, 33, 0],
    // l
    [288, 83, 101, 83, 280, 72, 72, 61, 168, 3, 54, 71, 65, 99, 158, 86, 6, 114, 129, 123, 114, 45, 46, 10, 108, 8],
    // m
    [124, 26, 49, 32, 114, 11, 28, 38, 75, 3, 12, 65, 15, 46, 91, 44, 1, 87, 61, 55, 69, 5, 8, 3, 54, 2],
    // n
    [198, 46, 88, 76, 218, 34, 101, 62, 192, 7, 55, 99, 46, 23, 173, 52, 1, 132, 113, 119, 106, 25, 49, 7, 81, 4],
    // o
    [151, 82, 125, 109, 209, 51, 84, 98, 91, 12, 39, 158, 91, 173, 81, 82, 3, 253, 154, 181, 96, 56, 71, 13, 98, 9],
    // p
    [119, 6, 54, 29, 156, 3, 19, 42, 96, 1, 23, 86, 44, 52, 82, 19, 2, 116, 116, 79, 64, 6, 12, 5, 69, 5],
    // q
    [12, 1, 2, 1, 13, 0, 0, 2, 11, 0, 5, 6, 1, 1, 3, 2, 0, 5, 6, 9, 29, 0, 0, 0, 1, 0],
    // r
    [318, 94, 145, 129, 424, 78, 95, 101, 194, 6, 56, 114, 87, 132, 253, 116, 5, 60, 165, 205, 139, 56, 76, 7, 109, 10],
    // s
    [224, 35, 85, 38, 256, 32, 39, 114, 147, 2, 69, 129, 61, 113, 154, 116, 6, 165, 49, 201, 129, 22, 49, 3, 91, 2],
    // t
    [257, 56, 95, 61, 277, 57, 51, 135, 192, 8, 29, 123, 55, 119, 181, 79, 9, 205, 201, 61, 138, 20, 42, 13, 81, 5],
    // u
    [76, 62, 90, 71, 140, 40, 73, 68, 63, 10, 35, 114, 69, 106, 96, 64, 29, 139, 129, 138, 10, 15, 6, 2, 71, 4],
    // v
    [66, 4, 18, 15, 98, 2, 15, 10, 51, 0, 3, 45, 5, 25, 56, 6, 0, 56, 22, 20, 15, 4, 5, 1, 13, 0],
    // w
    [59, 9, 20, 33, 86, 9, 16, 40, 45, 1, 13, 46, 8, 49, 71, 12, 0, 76, 49, 42, 6, 5, 1, 2, 29, 2],
    // x
    [12, 4, 3, 3, 23, 2, 0, 2, 20, 0, 0, 10, 3, 7, 13, 5, 0, 7, 3, 13, 2, 1, 2, 0, 3, 0],
    // y
    [144, 41, 43, 82, 97, 37, 47, 49, 85, 9, 33, 108, 54, 81, 98, 69, 1, 109, 91, 81, 71, 13, 29, 3, 8, 8],
    // z
    [19, 6, 2, 2, 19, 4, 4, 1, 9, 1, 0, 8, 2, 4, 9, 5, 0, 10, 2, 5, 4, 0, 2, 0, 8, 5],
];

#[inline]
fn index(letter: u8) -> usize {
    usize::from(letter - b'a')
}

/// Presence weight of a single letter
#[inline]
#[must_use]
pub fn presence_count(letter: u8) -> u16 {
    LETTER_PRESENCE_COUNTS[index(letter)]
}

/// Co-occurrence count for an ordered letter pair
#[inline]
#[must_use]
pub fn contingency(first: u8, second: u8) -> u16 {
    CONTINGENCY[index(first)][index(second)]
}

/// External word-usage frequencies, log-scaled and min-max normalized
///
/// Raw counts are mapped through `log10(count + 1)` and rescaled to [0, 1]
/// over the whole table. The range is floored at 1 so a near-flat table does
/// not blow up small differences. Unknown words score 0.
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    normalized: FxHashMap<Box<str>, f64>,
}

impl UsageTable {
    /// An empty table; every word scores 0
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw `(word, count)` pairs
    ///
    /// Words are lowercased; negative or non-finite counts are treated as 0.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let logged: Vec<(Box<str>, f64)> = counts
            .into_iter()
            .map(|(word, count)| {
                let count = if count.is_finite() && count > 0.0 { count } else { 0.0 };
                (
                    word.as_ref().trim().to_ascii_lowercase().into_boxed_str(),
                    (count + 1.0).log10(),
                )
            })
            .collect();

        let min = logged.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = logged
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        let range = (max - min).max(1.0);

        let normalized = logged
            .into_iter()
            .map(|(word, value)| (word, (value - min) / range))
            .collect();

        Self { normalized }
    }

    /// Normalized usage in [0, 1]
    #[must_use]
    pub fn normalized(&self, word: &str) -> f64 {
        self.normalized.get(word).copied().unwrap_or(0.0)
    }

    /// Usage score on the positional-frequency scale
    #[must_use]
    pub fn language_score(&self, word: &Word) -> f64 {
        self.normalized(word.text()) * LANGUAGE_SCALE
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
