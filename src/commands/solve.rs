//! Word solving command
//!
//! Plays a known target with the recommender and records every step.

use super::WordPools;
use crate::constraints::{Board, BoardRow, FreeTextFilters};
use crate::core::{Pattern, Word};
use crate::error::Result;
use crate::solver::{RecommendOptions, RecommenderConfig, SolveMode, SuggestionKind, Yielder};
use tracing::debug;

/// Configuration for solving a word
#[derive(Debug, Clone)]
pub struct SolveConfig {
    pub target: String,
    pub max_guesses: usize,
    pub hard: bool,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: String) -> Self {
        Self {
            target,
            max_guesses: 6,
            hard: false,
        }
    }

    #[must_use]
    pub const fn hard(mut self, hard: bool) -> Self {
        self.hard = hard;
        self
    }
}

/// Result of solving a word
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub target: Word,
}

/// A single guess step in the solution
#[derive(Debug, Clone)]
pub struct GuessStep {
    pub word: Word,
    pub kind: SuggestionKind,
    pub pattern: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub expected_remaining: Option<f64>,
}

/// Play `config.target` taking the recommended guess every turn
///
/// Stops early if no guess can be recommended, which happens when the
/// target is not among the answers.
///
/// # Errors
///
/// Returns an error if the target is not a valid word of the board width.
pub async fn solve_word<Y: Yielder>(
    pools: &WordPools,
    config: &SolveConfig,
    recommender: RecommenderConfig,
    yielder: &mut Y,
) -> Result<SolveResult> {
    let width = pools.width();
    let target = Word::with_length(&config.target, width)?;
    let mut session = pools.session(recommender);
    let mut board = Board::new(width);
    let options = RecommendOptions {
        solve_mode: if config.hard {
            SolveMode::Hard
        } else {
            SolveMode::Normal
        },
        ..RecommendOptions::normal()
    };

    let mut guesses = Vec::new();
    let mut success = false;

    while guesses.len() < config.max_guesses {
        let before = session.candidates().len();
        let Some(rec) = session.recommend(&options, yielder).await else {
            break;
        };
        let Some(choice) = rec.recommended.clone() else {
            debug!(target = %target, "no guess left to recommend");
            break;
        };

        let pattern = Pattern::calculate(&choice.word, &target);
        board.push(BoardRow::with_pattern(choice.word.text(), pattern));
        session.apply_board(&board, &FreeTextFilters::default());

        guesses.push(GuessStep {
            word: choice.word,
            kind: choice.kind,
            pattern,
            candidates_before: before,
            candidates_after: session.candidates().len(),
            expected_remaining: choice.expected_remaining,
        });

        if pattern.is_all_correct() {
            success = true;
            break;
        }
    }

    Ok(SolveResult {
        success,
        guesses,
        target,
    })
}
