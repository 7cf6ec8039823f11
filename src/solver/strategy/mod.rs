//! Guess scoring strategies
//!
//! A closed set of tagged strategies, each a pure function of a word and the
//! current candidate set, plus weighted blends of them. Higher scores are
//! always better: `expected` and `minimax` are negated.

mod blend;
mod context;
pub mod letters;
pub mod positional;

pub use blend::BlendSpec;
pub use context::{ScoringContext, binary_entropy};

use crate::core::Word;
use crate::error::{AdvisorError, Result};
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Scoring strategy tag
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Distinct letters weighted by how many candidates contain them
    Frequency,
    /// Normalised external usage frequency
    LanguageFrequency,
    /// Distinct letters weighted by global presence counts
    Presence,
    /// Pairwise letter co-occurrence
    Contingency,
    /// Coverage of uncertain letters
    Probe,
    Entropy,
    /// Negated expected remaining candidates
    Expected,
    /// Negated largest partition
    Minimax,
    PositionalFrequency,
    /// Same as `Entropy`
    PositionalEntropy,
    PositionalEntropyHeuristic,
    PositionalPattern,
    PositionalWeight,
}

impl Strategy {
    /// Strategies that partition the candidate set for every word
    #[must_use]
    pub const fn is_heavy(self) -> bool {
        matches!(
            self,
            Self::Entropy | Self::Expected | Self::Minimax | Self::PositionalEntropy
        )
    }

    /// Human-readable name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frequency => "Letter frequency",
            Self::LanguageFrequency => "Language frequency",
            Self::Presence => "Letter presence",
            Self::Contingency => "Letter contingency",
            Self::Probe => "Probe coverage",
            Self::Entropy => "Entropy",
            Self::Expected => "Expected remaining",
            Self::Minimax => "Minimax",
            Self::PositionalFrequency => "Positional frequency",
            Self::PositionalEntropy => "Positional entropy",
            Self::PositionalEntropyHeuristic => "Positional entropy (heuristic)",
            Self::PositionalPattern => "Positional pattern",
            Self::PositionalWeight => "Positional weight",
        }
    }
}

/// What to score with: one strategy or a blend
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreMode {
    Single(Strategy),
    Blend(BlendSpec),
}

impl ScoreMode {
    /// Parse `name`, `a+b` (equal blend) or `a=w1,b=w2`
    ///
    /// # Errors
    /// Returns `AdvisorError::Parse` for unknown strategy names or weights.
    ///
    /// # Examples
    /// ```
    /// use wordle_advisor::solver::{ScoreMode, Strategy};
    ///
    /// assert_eq!(ScoreMode::parse("entropy").unwrap(), ScoreMode::Single(Strategy::Entropy));
    /// assert!(matches!(ScoreMode::parse("presence+minimax").unwrap(), ScoreMode::Blend(_)));
    /// assert!(ScoreMode::parse("presence=2,nonsense=1").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let strategy = |name: &str| {
            Strategy::from_str(name.trim())
                .map_err(|_| AdvisorError::Parse(format!("unknown strategy: {name}")))
        };

        if text.contains('=') {
            let entries = text
                .split(',')
                .map(|part| -> Result<(Strategy, f64)> {
                    let (name, weight) = part
                        .split_once('=')
                        .ok_or_else(|| AdvisorError::Parse(format!("expected NAME=WEIGHT: {part}")))?;
                    let weight: f64 = weight
                        .trim()
                        .parse()
                        .map_err(|_| AdvisorError::Parse(format!("invalid weight: {weight}")))?;
                    Ok((strategy(name)?, weight))
                })
                .collect::<Result<Vec<_>>>()?;
            return BlendSpec::new(entries)
                .map(Self::Blend)
                .ok_or_else(|| AdvisorError::Parse("empty blend".to_string()));
        }

        if text.contains('+') {
            let entries = text
                .split('+')
                .map(|name| -> Result<(Strategy, f64)> { Ok((strategy(name)?, 1.0)) })
                .collect::<Result<Vec<_>>>()?;
            return BlendSpec::new(entries)
                .map(Self::Blend)
                .ok_or_else(|| AdvisorError::Parse("empty blend".to_string()));
        }

        strategy(text).map(Self::Single)
    }

    /// Stable identifier for caching
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Single(strategy) => strategy.to_string(),
            Self::Blend(blend) => blend.key(),
        }
    }

    #[must_use]
    pub fn is_heavy(&self) -> bool {
        match self {
            Self::Single(strategy) => strategy.is_heavy(),
            Self::Blend(blend) => blend.is_heavy(),
        }
    }
}

impl Default for ScoreMode {
    fn default() -> Self {
        Self::Single(Strategy::Frequency)
    }
}

impl FromStr for ScoreMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(strategy) => write!(f, "{strategy}"),
            Self::Blend(blend) => {
                for (i, (strategy, weight)) in blend.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{weight:.2}×{strategy}")?;
                }
                Ok(())
            }
        }
    }
}

/// A word with its score under some mode
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: Word,
    pub score: f64,
}

/// Score a single word with one strategy
#[must_use]
pub fn score_word(strategy: Strategy, word: &Word, ctx: &ScoringContext) -> f64 {
    match strategy {
        Strategy::Frequency => letters::frequency(word, ctx),
        Strategy::LanguageFrequency => ctx.usage().language_score(word),
        Strategy::Presence => letters::presence(word),
        Strategy::Contingency => letters::contingency_score(word),
        Strategy::Probe => letters::coverage(word, ctx),
        Strategy::Entropy | Strategy::PositionalEntropy => ctx.partition(word).entropy(),
        Strategy::Expected => -ctx.partition(word).expected_remaining(),
        Strategy::Minimax => -(ctx.partition(word).minimax() as f64),
        Strategy::PositionalFrequency => positional::frequency(word, ctx),
        Strategy::PositionalEntropyHeuristic => positional::entropy_heuristic(word, ctx),
        Strategy::PositionalPattern => positional::pattern(word, ctx),
        Strategy::PositionalWeight => positional::weight(word, ctx),
    }
}

/// Raw scores of `words` under one strategy, in input order
#[must_use]
pub fn score_strategy(strategy: Strategy, words: &[Word], ctx: &ScoringContext) -> Vec<f64> {
    words.iter().map(|w| score_word(strategy, w, ctx)).collect()
}

/// Weighted sum of per-strategy score columns
///
/// `columns` holds one score vector per entry of `blend.distinct()`.
#[must_use]
pub fn combine_blend(blend: &BlendSpec, words: &[Word], columns: &[Vec<f64>]) -> Vec<ScoredWord> {
    let weights: Vec<f64> = blend
        .distinct()
        .into_iter()
        .map(|s| blend.weight_of(s))
        .collect();

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let score = columns
                .iter()
                .zip(&weights)
                .map(|(column, weight)| column.get(i).copied().unwrap_or(0.0) * weight)
                .sum();
            ScoredWord {
                word: word.clone(),
                score,
            }
        })
        .collect()
}

/// Score every word synchronously
///
/// Blends score each distinct constituent once.
#[must_use]
pub fn score_all(words: &[Word], mode: &ScoreMode, ctx: &ScoringContext) -> Vec<ScoredWord> {
    match mode {
        ScoreMode::Single(strategy) => words
            .iter()
            .map(|word| ScoredWord {
                word: word.clone(),
                score: score_word(*strategy, word, ctx),
            })
            .collect(),
        ScoreMode::Blend(blend) => {
            let columns: Vec<Vec<f64>> = blend
                .distinct()
                .into_iter()
                .map(|s| score_strategy(s, words, ctx))
                .collect();
            combine_blend(blend, words, &columns)
        }
    }
}
