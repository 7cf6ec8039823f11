//! Command implementations
//!
//! Each command takes already-loaded word pools and returns a plain result
//! struct; printing lives in [`crate::output`].

pub mod benchmark;
pub mod check;
pub mod score;
pub mod solve;
pub mod suggest;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, GameOutcome, play_game, run_benchmark};
pub use check::check_guess;
pub use score::{ScoreConfig, ScoreResult, score_candidates};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_word};
pub use suggest::{SuggestResult, suggest};

use crate::constraints::{Board, ConfirmedRow};
use crate::core::Word;
use crate::error::{AdvisorError, Result};
use crate::solver::{RecommenderConfig, SolverSession, UsageTable};

/// Everything a command needs to start a session
#[derive(Debug, Clone, Default)]
pub struct WordPools {
    /// Possible answers
    pub answers: Vec<Word>,
    /// Extra allowed guesses; the session adds every answer
    pub guesses: Vec<Word>,
    pub usage: UsageTable,
}

impl WordPools {
    #[must_use]
    pub fn new(answers: Vec<Word>, guesses: Vec<Word>, usage: UsageTable) -> Self {
        Self {
            answers,
            guesses,
            usage,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.answers.first().map_or(5, Word::len)
    }

    /// A fresh session over these pools
    #[must_use]
    pub fn session(&self, config: RecommenderConfig) -> SolverSession {
        SolverSession::with_config(
            self.answers.clone(),
            self.guesses.clone(),
            self.usage.clone(),
            config,
        )
    }
}

/// Parse `WORD:PATTERN` arguments into a board of the given width
///
/// # Errors
///
/// Returns `AdvisorError::Parse` for a malformed row and
/// `AdvisorError::InvalidArgument` for a row of the wrong width.
pub fn parse_board(width: usize, rows: &[String]) -> Result<Board> {
    let rows = rows
        .iter()
        .map(|row| row.parse::<ConfirmedRow>())
        .collect::<Result<Vec<_>>>()?;
    if let Some(bad) = rows.iter().find(|r| r.guess.len() != width) {
        return Err(AdvisorError::InvalidArgument(format!(
            "row {} is not {width} letters",
            bad.guess
        )));
    }
    Ok(Board::from_confirmed(width, &rows))
}
