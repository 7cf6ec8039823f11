//! Strategy benchmark
//!
//! Plays every answer (or a seeded sample) always taking the top-scored
//! remaining candidate under a score mode. Games are independent, so they
//! run in parallel; each game is itself single-threaded and synchronous.

use super::WordPools;
use crate::candidates::CandidateSet;
use crate::constraints::{Board, BoardRow, FreeTextFilters, filter_candidates, resolve_constraints};
use crate::core::{Pattern, Word};
use crate::solver::{ScoreMode, ScoredWord, ScoringContext, UsageTable, score_all};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// What to benchmark and on how many answers
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    pub mode: ScoreMode,
    /// Sample size; `None` plays every answer
    pub count: Option<usize>,
    pub seed: u64,
    pub max_guesses: usize,
    pub progress: bool,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(mode: ScoreMode) -> Self {
        Self {
            mode,
            count: None,
            seed: 0,
            max_guesses: 6,
            progress: false,
        }
    }
}

/// One played game
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub target: Word,
    pub guesses: Vec<Word>,
    pub solved: bool,
}

/// Result of a benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub total_words: usize,
    pub solved: usize,
    /// Average over solved games
    pub average_guesses: f64,
    pub distribution: FxHashMap<usize, usize>,
    pub failures: Vec<Word>,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Play one game against `target`
///
/// Each turn scores the remaining candidates and guesses the highest-scoring
/// one not yet played; ties go to the earlier word in the answer list.
#[must_use]
pub fn play_game(
    answers: &[Word],
    usage: &Arc<UsageTable>,
    mode: &ScoreMode,
    target: &Word,
    max_guesses: usize,
) -> GameOutcome {
    let width = target.len();
    let mut board = Board::new(width);
    let mut candidates = answers.to_vec();
    let mut guesses: Vec<Word> = Vec::new();

    while guesses.len() < max_guesses {
        let version = guesses.len() as u64 + 1;
        let ctx = ScoringContext::build(
            CandidateSet::new(candidates.clone(), version),
            Arc::clone(usage),
            board.letter_sets().green_positions,
        );
        let scored = score_all(&candidates, mode, &ctx);
        let best = scored
            .iter()
            .filter(|s| !guesses.contains(&s.word))
            .fold(None, |best: Option<&ScoredWord>, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            });
        let Some(best) = best else {
            break;
        };

        let guess = best.word.clone();
        let pattern = Pattern::calculate(&guess, target);
        guesses.push(guess.clone());
        if pattern.is_all_correct() {
            return GameOutcome {
                target: target.clone(),
                guesses,
                solved: true,
            };
        }

        board.push(BoardRow::with_pattern(guess.text(), pattern));
        let constraint = resolve_constraints(&board, &FreeTextFilters::default());
        candidates = filter_candidates(answers, &constraint);
    }

    GameOutcome {
        target: target.clone(),
        guesses,
        solved: false,
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        .map(|style| style.progress_chars("█▓▒░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

/// Run the benchmark over the answers in `pools`
#[must_use]
pub fn run_benchmark(pools: &WordPools, config: &BenchmarkConfig) -> BenchmarkResult {
    let targets: Vec<&Word> = match config.count {
        Some(count) if count < pools.answers.len() => {
            let mut rng = StdRng::seed_from_u64(config.seed);
            pools.answers.choose_multiple(&mut rng, count).collect()
        }
        _ => pools.answers.iter().collect(),
    };
    info!(games = targets.len(), mode = %config.mode, "benchmark started");

    let bar = config.progress.then(|| progress_bar(targets.len()));
    let usage = Arc::new(pools.usage.clone());
    let start = Instant::now();

    let outcomes: Vec<GameOutcome> = targets
        .par_iter()
        .map(|target| {
            let outcome = play_game(&pools.answers, &usage, &config.mode, target, config.max_guesses);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
            outcome
        })
        .collect();

    if let Some(bar) = &bar {
        bar.finish_with_message("done");
    }
    let duration = start.elapsed();

    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
    let mut failures = Vec::new();
    let mut total_guesses = 0;
    for outcome in &outcomes {
        if outcome.solved {
            *distribution.entry(outcome.guesses.len()).or_insert(0) += 1;
            total_guesses += outcome.guesses.len();
        } else {
            failures.push(outcome.target.clone());
        }
    }
    let solved = outcomes.len() - failures.len();

    BenchmarkResult {
        total_words: outcomes.len(),
        solved,
        average_guesses: if solved == 0 {
            0.0
        } else {
            total_guesses as f64 / solved as f64
        },
        distribution,
        failures,
        duration,
        words_per_second: outcomes.len() as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Strategy;
    use crate::wordlists::words_from_slice;

    const ANSWERS: [&str; 10] = [
        "crane", "slate", "trace", "irate", "stare", "pious", "about", "fjord", "nymph", "glyph",
    ];

    fn pools() -> WordPools {
        WordPools::new(words_from_slice(&ANSWERS), Vec::new(), UsageTable::empty())
    }

    #[test]
    fn every_game_is_accounted_for() {
        let result = run_benchmark(&pools(), &BenchmarkConfig::new(ScoreMode::Single(Strategy::Entropy)));

        assert_eq!(result.total_words, 10);
        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum + result.failures.len(), result.total_words);
        assert!(result.distribution.keys().all(|&g| (1..=6).contains(&g)));
        assert!(result.average_guesses >= 1.0);
    }

    #[test]
    fn sampling_is_seeded() {
        let mut config = BenchmarkConfig::new(ScoreMode::Single(Strategy::Frequency));
        config.count = Some(4);
        config.seed = 7;
        let first = run_benchmark(&pools(), &config);
        let second = run_benchmark(&pools(), &config);
        assert_eq!(first.total_words, 4);
        assert_eq!(first.failures, second.failures);
        assert_eq!(first.distribution, second.distribution);
    }

    #[test]
    fn game_ends_on_the_target() {
        let answers = words_from_slice(&ANSWERS);
        let target = Word::new("nymph").unwrap();
        let outcome = play_game(
            &answers,
            &Arc::new(UsageTable::empty()),
            &ScoreMode::Single(Strategy::Presence),
            &target,
            6,
        );
        assert!(outcome.solved);
        assert_eq!(outcome.guesses.last(), Some(&target));
        let unique: std::collections::HashSet<_> = outcome.guesses.iter().collect();
        assert_eq!(unique.len(), outcome.guesses.len());
    }

    #[test]
    fn empty_answer_list() {
        let pools = WordPools::default();
        let result = run_benchmark(&pools, &BenchmarkConfig::new(ScoreMode::default()));
        assert_eq!(result.total_words, 0);
        assert!(result.average_guesses.abs() < f64::EPSILON);
    }
}
