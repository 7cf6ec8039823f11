//! Solver session
//!
//! Owns every piece of mutable solving state: the word pools, the active
//! candidate set, the partition memo, result caches and the cancellation
//! tokens of the two pass families (scoring and recommendation).
//!
//! Long passes are split into two halves so a host can run them on its own
//! executor while the session stays borrowable:
//!
//! ```text
//! let request = session.scoring_pass(&mode);      // snapshot + fresh token
//! let batch = request.run(&mut yielder).await;    // no session borrow
//! session.accept_scores(&batch);                  // dropped if stale
//! ```
//!
//! Replacing the candidate set cancels both in-flight passes and drops every
//! cached result, so a result computed against an old set can never be shown.

use super::metrics::PartitionCache;
use super::recommender::{
    Recommendation, RecommendOptions, RecommenderConfig, SolveMode, recommend_next_guess,
};
use super::scheduler::{CancelToken, TokenSlot, Yielder, score_words};
use super::strategy::{ScoreMode, ScoredWord, ScoringContext};
use super::tables::UsageTable;
use crate::candidates::{CandidateSet, CandidateStore};
use crate::constraints::{
    Board, BoardLetterSets, ConfirmedRow, FreeTextFilters, HardModeConstraints, HardModeVerdict,
    filter_candidates, resolve_constraints,
};
use crate::core::Word;
use crate::wordlists::merge_guess_pool;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Scores for one candidate-set version and score mode
#[derive(Debug, Clone)]
pub struct ScoreBatch {
    pub version: u64,
    pub mode_key: String,
    pub scores: Arc<[ScoredWord]>,
}

/// A scoring pass detached from the session
#[derive(Debug)]
pub struct ScorePass {
    version: u64,
    mode: ScoreMode,
    words: Arc<[Word]>,
    ctx: Arc<ScoringContext>,
    token: CancelToken,
    config: RecommenderConfig,
}

impl ScorePass {
    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Score every candidate; `None` if the pass was cancelled
    pub async fn run<Y: Yielder>(self, yielder: &mut Y) -> Option<ScoreBatch> {
        let scores = score_words(
            &self.words,
            &self.mode,
            &self.ctx,
            &self.token,
            yielder,
            &self.config.scheduler,
        )
        .await?;
        Some(ScoreBatch {
            version: self.version,
            mode_key: self.mode.key(),
            scores: scores.into(),
        })
    }
}

/// Either a cached result or a pass that must be run
#[derive(Debug)]
pub enum ScoreRequest {
    Cached(ScoreBatch),
    Pending(ScorePass),
}

impl ScoreRequest {
    pub async fn run<Y: Yielder>(self, yielder: &mut Y) -> Option<ScoreBatch> {
        match self {
            Self::Cached(batch) => Some(batch),
            Self::Pending(pass) => pass.run(yielder).await,
        }
    }
}

/// Recommendation cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecommendKey {
    pub version: u64,
    pub solve_mode: SolveMode,
    pub allow_probes: bool,
    pub hide_double_letters: bool,
    pub exclude_green_letters: bool,
    pub exclude_yellow_letters: bool,
}

impl RecommendKey {
    fn new(version: u64, options: &RecommendOptions) -> Self {
        Self {
            version,
            solve_mode: options.solve_mode,
            allow_probes: options.allow_probes,
            hide_double_letters: options.hide_double_letters,
            exclude_green_letters: options.exclude_green_letters,
            exclude_yellow_letters: options.exclude_yellow_letters,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendBatch {
    pub key: RecommendKey,
    pub recommendation: Arc<Recommendation>,
}

/// A recommendation pass detached from the session
#[derive(Debug)]
pub struct RecommendPass {
    key: RecommendKey,
    guess_pool: Arc<[Word]>,
    options: RecommendOptions,
    board: BoardLetterSets,
    ctx: Arc<ScoringContext>,
    config: RecommenderConfig,
    token: CancelToken,
}

impl RecommendPass {
    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub async fn run<Y: Yielder>(self, yielder: &mut Y) -> Option<RecommendBatch> {
        let recommendation = recommend_next_guess(
            &self.guess_pool,
            &self.options,
            &self.board,
            &self.ctx,
            &self.config,
            &self.token,
            yielder,
        )
        .await?;
        Some(RecommendBatch {
            key: self.key,
            recommendation: Arc::new(recommendation),
        })
    }
}

#[derive(Debug)]
pub enum RecommendRequest {
    Cached(RecommendBatch),
    Pending(RecommendPass),
}

impl RecommendRequest {
    pub async fn run<Y: Yielder>(self, yielder: &mut Y) -> Option<RecommendBatch> {
        match self {
            Self::Cached(batch) => Some(batch),
            Self::Pending(pass) => pass.run(yielder).await,
        }
    }
}

/// Solving state for one game
#[derive(Debug)]
pub struct SolverSession {
    word_pool: Arc<[Word]>,
    guess_pool: Arc<[Word]>,
    usage: Arc<UsageTable>,
    width: usize,
    store: CandidateStore,
    partitions: PartitionCache,
    context: Arc<ScoringContext>,
    rows: Vec<ConfirmedRow>,
    letter_sets: BoardLetterSets,
    score_cache: FxHashMap<(u64, String), Arc<[ScoredWord]>>,
    recommend_cache: FxHashMap<RecommendKey, Arc<Recommendation>>,
    scoring: TokenSlot,
    recommending: TokenSlot,
    config: RecommenderConfig,
}

impl SolverSession {
    /// Start a session with every word of `word_pool` as a candidate
    ///
    /// `word_pool` holds possible answers and `guess_pool` the words allowed
    /// as probes; every answer is added to the guess pool. Words whose length
    /// differs from the first answer are dropped from both.
    #[must_use]
    pub fn new(word_pool: Vec<Word>, guess_pool: Vec<Word>, usage: UsageTable) -> Self {
        Self::with_config(word_pool, guess_pool, usage, RecommenderConfig::default())
    }

    #[must_use]
    pub fn with_config(
        word_pool: Vec<Word>,
        guess_pool: Vec<Word>,
        usage: UsageTable,
        config: RecommenderConfig,
    ) -> Self {
        let width = word_pool.first().map_or(5, Word::len);
        let word_pool: Arc<[Word]> = word_pool.into_iter().filter(|w| w.len() == width).collect();
        let guess_pool: Arc<[Word]> = merge_guess_pool(&word_pool, guess_pool)
            .into_iter()
            .filter(|w| w.len() == width)
            .collect();
        let usage = Arc::new(usage);
        let partitions = PartitionCache::new();

        let mut store = CandidateStore::new();
        store.set(Arc::clone(&word_pool));
        let context = Arc::new(ScoringContext::with_cache(
            store.get(),
            Arc::clone(&usage),
            vec![None; width],
            partitions.clone(),
        ));

        info!(
            answers = word_pool.len(),
            guesses = guess_pool.len(),
            width,
            "session started"
        );

        Self {
            word_pool,
            guess_pool,
            usage,
            width,
            store,
            partitions,
            context,
            rows: Vec::new(),
            letter_sets: BoardLetterSets {
                green_positions: vec![None; width],
                ..BoardLetterSets::default()
            },
            score_cache: FxHashMap::default(),
            recommend_cache: FxHashMap::default(),
            scoring: TokenSlot::new(),
            recommending: TokenSlot::new(),
            config,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    #[must_use]
    pub fn candidates(&self) -> CandidateSet {
        self.store.get()
    }

    #[must_use]
    pub fn word_pool(&self) -> &[Word] {
        &self.word_pool
    }

    #[must_use]
    pub fn guess_pool(&self) -> &[Word] {
        &self.guess_pool
    }

    #[must_use]
    pub fn context(&self) -> Arc<ScoringContext> {
        Arc::clone(&self.context)
    }

    #[must_use]
    pub const fn letter_sets(&self) -> &BoardLetterSets {
        &self.letter_sets
    }

    /// Words on confirmed rows, in board order
    #[must_use]
    pub fn guessed_words(&self) -> Vec<Word> {
        self.rows.iter().map(|r| r.guess.clone()).collect()
    }

    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Re-filter the word pool against `board` and `filters`
    ///
    /// Returns the new candidate-set version.
    pub fn apply_board(&mut self, board: &Board, filters: &FreeTextFilters) -> u64 {
        let constraint = resolve_constraints(board, filters);
        let filtered = filter_candidates(&self.word_pool, &constraint);
        self.rows = board.confirmed_rows();
        self.letter_sets = board.letter_sets();
        self.replace_candidates(filtered)
    }

    /// Replace the candidate set directly, bypassing constraint resolution
    pub fn set_candidate_pool(&mut self, words: Vec<Word>) -> u64 {
        let width = self.width;
        self.replace_candidates(words.into_iter().filter(|w| w.len() == width).collect())
    }

    fn replace_candidates(&mut self, words: Vec<Word>) -> u64 {
        self.scoring.cancel();
        self.recommending.cancel();
        self.score_cache.clear();
        self.recommend_cache.clear();

        let version = self.store.set(words);
        self.context = Arc::new(ScoringContext::with_cache(
            self.store.get(),
            Arc::clone(&self.usage),
            self.letter_sets.green_positions.clone(),
            self.partitions.clone(),
        ));
        version
    }

    /// Prepare a scoring pass over the candidates
    ///
    /// Cancels any scoring pass still running. A cached result for the
    /// current version and mode is returned without a pass.
    pub fn scoring_pass(&mut self, mode: &ScoreMode) -> ScoreRequest {
        let version = self.version();
        let mode_key = mode.key();
        if let Some(scores) = self.score_cache.get(&(version, mode_key.clone())) {
            debug!(version, mode = %mode_key, "score cache hit");
            return ScoreRequest::Cached(ScoreBatch {
                version,
                mode_key,
                scores: Arc::clone(scores),
            });
        }

        ScoreRequest::Pending(ScorePass {
            version,
            mode: mode.clone(),
            words: self.store.get().shared_words(),
            ctx: Arc::clone(&self.context),
            token: self.scoring.renew(),
            config: self.config,
        })
    }

    /// Store a finished batch; false if it belongs to an older candidate set
    pub fn accept_scores(&mut self, batch: &ScoreBatch) -> bool {
        if batch.version != self.version() {
            debug!(
                stale = batch.version,
                current = self.version(),
                "discarding stale scores"
            );
            return false;
        }
        self.score_cache
            .insert((batch.version, batch.mode_key.clone()), Arc::clone(&batch.scores));
        true
    }

    /// Score the candidates under `mode`, using the cache when possible
    pub async fn score<Y: Yielder>(&mut self, mode: &ScoreMode, yielder: &mut Y) -> Option<Arc<[ScoredWord]>> {
        let batch = self.scoring_pass(mode).run(yielder).await?;
        self.accept_scores(&batch).then_some(batch.scores)
    }

    /// Prepare a recommendation pass
    ///
    /// `already_guessed` is taken from the board, overriding whatever the
    /// caller passed.
    pub fn recommendation_pass(&mut self, options: &RecommendOptions) -> RecommendRequest {
        let key = RecommendKey::new(self.version(), options);
        if let Some(rec) = self.recommend_cache.get(&key) {
            debug!(version = key.version, "recommendation cache hit");
            return RecommendRequest::Cached(RecommendBatch {
                key,
                recommendation: Arc::clone(rec),
            });
        }

        let options = RecommendOptions {
            already_guessed: self.guessed_words(),
            ..options.clone()
        };
        RecommendRequest::Pending(RecommendPass {
            key,
            guess_pool: Arc::clone(&self.guess_pool),
            options,
            board: self.letter_sets.clone(),
            ctx: Arc::clone(&self.context),
            config: self.config,
            token: self.recommending.renew(),
        })
    }

    /// Store a finished recommendation; false if it is stale
    pub fn accept_recommendation(&mut self, batch: &RecommendBatch) -> bool {
        if batch.key.version != self.version() {
            debug!(
                stale = batch.key.version,
                current = self.version(),
                "discarding stale recommendation"
            );
            return false;
        }
        self.recommend_cache
            .insert(batch.key, Arc::clone(&batch.recommendation));
        true
    }

    pub async fn recommend<Y: Yielder>(
        &mut self,
        options: &RecommendOptions,
        yielder: &mut Y,
    ) -> Option<Arc<Recommendation>> {
        let batch = self.recommendation_pass(options).run(yielder).await?;
        self.accept_recommendation(&batch)
            .then_some(batch.recommendation)
    }

    /// Cancel both pass families
    pub fn cancel_all(&mut self) {
        self.scoring.cancel();
        self.recommending.cancel();
    }

    /// Requirements derived from the confirmed rows
    #[must_use]
    pub fn hard_mode_constraints(&self) -> HardModeConstraints {
        HardModeConstraints::from_rows(&self.rows)
    }

    #[must_use]
    pub fn validate_hard_mode_guess(&self, guess: &str) -> HardModeVerdict {
        crate::constraints::validate_hard_mode_guess(guess, self.width, &self.hard_mode_constraints())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::scheduler::NoYield;
    use crate::solver::strategy::Strategy;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    const ANSWERS: [&str; 10] = [
        "crane", "slate", "trace", "irate", "stare", "batch", "catch", "hatch", "latch", "match",
    ];

    fn session() -> SolverSession {
        SolverSession::new(
            words(&ANSWERS),
            words(&["clamp", "plumb", "sworn"]),
            UsageTable::empty(),
        )
    }

    fn board(rows: &[&str]) -> Board {
        let rows: Vec<ConfirmedRow> = rows.iter().map(|r| r.parse().unwrap()).collect();
        Board::from_confirmed(5, &rows)
    }

    #[test]
    fn starts_with_every_answer() {
        let s = session();
        assert_eq!(s.version(), 1);
        assert_eq!(s.candidates().len(), ANSWERS.len());
    }

    #[test]
    fn apply_board_filters_and_bumps_version() {
        let mut s = session();
        // crane against slate
        let version = s.apply_board(&board(&["crane:BBGBG"]), &FreeTextFilters::default());
        assert_eq!(version, 2);
        assert_eq!(s.candidates().words(), words(&["slate"]).as_slice());
        assert_eq!(s.guessed_words(), words(&["crane"]));
        assert_eq!(s.context().version(), 2);
    }

    #[tokio::test]
    async fn scores_are_cached_per_version_and_mode() {
        let mut s = session();
        let mode = ScoreMode::Single(Strategy::Entropy);
        let first = s.score(&mode, &mut NoYield).await.unwrap();
        assert_eq!(first.len(), ANSWERS.len());
        assert!(matches!(s.scoring_pass(&mode), ScoreRequest::Cached(_)));
        assert!(matches!(
            s.scoring_pass(&ScoreMode::Single(Strategy::Minimax)),
            ScoreRequest::Pending(_)
        ));

        s.set_candidate_pool(words(&["batch", "catch"]));
        assert!(matches!(s.scoring_pass(&mode), ScoreRequest::Pending(_)));
    }

    #[tokio::test]
    async fn stale_scores_are_rejected() {
        let mut s = session();
        let ScoreRequest::Pending(pass) = s.scoring_pass(&ScoreMode::Single(Strategy::Frequency)) else {
            panic!("expected a fresh pass");
        };
        let token = pass.token().clone();

        s.set_candidate_pool(words(&["batch", "catch"]));
        assert!(token.is_cancelled());

        // a pass that finished just before the swap still carries the old version
        let stale = ScoreBatch {
            version: 1,
            mode_key: "frequency".to_string(),
            scores: Arc::from(Vec::new()),
        };
        assert!(!s.accept_scores(&stale));
        assert!(pass.run(&mut NoYield).await.is_none());
    }

    #[test]
    fn new_pass_cancels_previous_one() {
        let mut s = session();
        let ScoreRequest::Pending(first) = s.scoring_pass(&ScoreMode::Single(Strategy::Entropy)) else {
            panic!("expected a fresh pass");
        };
        let ScoreRequest::Pending(second) = s.scoring_pass(&ScoreMode::Single(Strategy::Minimax)) else {
            panic!("expected a fresh pass");
        };
        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());
    }

    #[tokio::test]
    async fn recommendation_cache_keys_on_toggles() {
        let mut s = session();
        let options = RecommendOptions::normal();
        let rec = s.recommend(&options, &mut NoYield).await.unwrap();
        assert!(rec.recommended.is_some());
        assert!(matches!(s.recommendation_pass(&options), RecommendRequest::Cached(_)));

        let hard = RecommendOptions {
            solve_mode: SolveMode::Hard,
            ..options.clone()
        };
        assert!(matches!(s.recommendation_pass(&hard), RecommendRequest::Pending(_)));
    }

    #[tokio::test]
    async fn recommendation_skips_guessed_words() {
        let mut s = session();
        s.apply_board(&board(&["batch:BGGGG"]), &FreeTextFilters::default());
        assert_eq!(s.candidates().len(), 4);

        let rec = s.recommend(&RecommendOptions::normal(), &mut NoYield).await.unwrap();
        assert!(!rec.ranked.is_empty());
        assert!(rec.ranked.iter().all(|r| r.word.text() != "batch"));
        // b is gray, so plumb is never offered
        assert!(rec.ranked.iter().all(|r| r.word.text() != "plumb"));
        assert!(rec.recommended.as_ref().unwrap().is_candidate());
    }

    #[test]
    fn hard_mode_validation_uses_board() {
        let mut s = session();
        s.apply_board(&board(&["crane:GBBBY"]), &FreeTextFilters::default());
        assert!(s.validate_hard_mode_guess("cheap").ok);
        let verdict = s.validate_hard_mode_guess("ocean");
        assert!(!verdict.ok);
        assert_eq!(verdict.reasons, ["position 1 must be C"]);
        assert_eq!(s.validate_hard_mode_guess("cat").reasons, ["invalid guess"]);
    }
}
