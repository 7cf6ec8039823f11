//! Next-guess recommendation
//!
//! Picks between an exact search and a coverage heuristic based on the
//! number of candidates and an operation budget:
//!
//! ```text
//! n > exact_threshold                      → fast path (coverage over the pool)
//! n² + shortlist × n > budget              → fast path
//! otherwise                                → exact expected-remaining on every
//!                                            candidate plus a coverage shortlist
//! ```
//!
//! The best candidate and the best overall guess are always reported, even
//! when they fall outside the ranked top list. [`choose_recommended`] then
//! decides between them.

use super::ranking::TopK;
use super::scheduler::{CancelToken, SchedulerConfig, Yielder};
use super::strategy::ScoringContext;
use super::strategy::letters::coverage;
use crate::constraints::BoardLetterSets;
use crate::core::{LetterSet, Word};
use rustc_hash::FxHashSet;
use strum::{Display, EnumString};
use tracing::{debug, info};

/// Normal mode allows probes; hard mode restricts guesses to candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SolveMode {
    #[default]
    Normal,
    Hard,
}

/// Tuning for the recommender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    /// Above this many candidates only the fast path runs (default: 600)
    pub exact_threshold: usize,
    /// Probe shortlist scored exactly (default: 250)
    pub shortlist_size: usize,
    /// Maximum partition work for the exact path (default: 2,500,000)
    pub budget: usize,
    /// Ranked suggestions returned (default: 12)
    pub max_results: usize,
    /// Relative expected-remaining gain that justifies a probe (default: 0.05)
    pub min_relative_gain: f64,
    /// Absolute expected-remaining gain that justifies a probe (default: 0.25)
    pub min_absolute_gain: f64,
    /// From this many candidates any improving probe is taken (default: 12)
    pub probe_eager_count: usize,
    /// At or below this many candidates always guess a candidate (default: 4)
    pub tiny_candidate_count: usize,
    /// At or below this many guesses left always guess a candidate (default: 2)
    pub endgame_guesses: usize,
    pub max_guesses: usize,
    /// Language weight in the coverage pre-score (default: 0.05)
    pub language_weight: f64,
    /// Coverage tie-break in exact scores (default: 0.03)
    pub exact_coverage_weight: f64,
    /// Language tie-break in exact scores (default: 0.001)
    pub exact_language_weight: f64,
    pub scheduler: SchedulerConfig,
}

impl RecommenderConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exact_threshold: 600,
            shortlist_size: 250,
            budget: 2_500_000,
            max_results: 12,
            min_relative_gain: 0.05,
            min_absolute_gain: 0.25,
            probe_eager_count: 12,
            tiny_candidate_count: 4,
            endgame_guesses: 2,
            max_guesses: 6,
            language_weight: 0.05,
            exact_coverage_weight: 0.03,
            exact_language_weight: 0.001,
            scheduler: SchedulerConfig::new(),
        }
    }

    #[must_use]
    pub const fn with_exact_threshold(mut self, exact_threshold: usize) -> Self {
        self.exact_threshold = exact_threshold;
        self
    }

    #[must_use]
    pub const fn with_shortlist_size(mut self, shortlist_size: usize) -> Self {
        self.shortlist_size = shortlist_size;
        self
    }

    #[must_use]
    pub const fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Toggles for one recommendation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendOptions {
    pub solve_mode: SolveMode,
    pub allow_probes: bool,
    /// Skip probes (never candidates) with a repeated letter
    pub hide_double_letters: bool,
    /// Skip probes containing a known green letter
    pub exclude_green_letters: bool,
    /// Skip probes containing a known yellow letter
    pub exclude_yellow_letters: bool,
    /// Words on confirmed rows
    pub already_guessed: Vec<Word>,
}

impl RecommendOptions {
    /// Normal mode with probes allowed
    #[must_use]
    pub fn normal() -> Self {
        Self {
            allow_probes: true,
            ..Self::default()
        }
    }

    /// Probes are only ever allowed in normal mode
    #[must_use]
    pub fn effective_allow_probes(&self) -> bool {
        self.allow_probes && self.solve_mode == SolveMode::Normal
    }

    #[must_use]
    pub fn guesses_remaining(&self, config: &RecommenderConfig) -> usize {
        config.max_guesses.saturating_sub(self.already_guessed.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SuggestionKind {
    Candidate,
    Probe,
}

/// One recommended guess
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub word: Word,
    pub kind: SuggestionKind,
    pub score: f64,
    /// Exact expected remaining candidates, in exact mode only
    pub expected_remaining: Option<f64>,
    pub coverage: f64,
}

impl Suggestion {
    #[must_use]
    pub fn is_candidate(&self) -> bool {
        self.kind == SuggestionKind::Candidate
    }
}

/// Result of a recommendation pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendation {
    /// Top suggestions, highest score first
    pub ranked: Vec<Suggestion>,
    /// Best guess overall, candidate or probe
    pub best: Option<Suggestion>,
    pub best_candidate: Option<Suggestion>,
    /// The single suggested next guess
    pub recommended: Option<Suggestion>,
    /// True if expected-remaining was computed exactly
    pub exact: bool,
}

impl Recommendation {
    /// Ranked suggestions with the recommended one moved to the front
    #[must_use]
    pub fn ordered(&self) -> Vec<Suggestion> {
        let mut ordered = self.ranked.clone();
        if let Some(rec) = &self.recommended {
            ordered.retain(|s| s.word != rec.word);
            ordered.insert(0, rec.clone());
        }
        ordered
    }
}

/// Pick the single guess to recommend
///
/// Candidates win outright when probing is off, two or fewer guesses are
/// left, four or fewer candidates remain, or the best guess is itself a
/// candidate. Otherwise a probe must beat the best candidate's expected
/// remaining count; below twelve candidates the gain must also be at least
/// 5% or 0.25. Without exact numbers a probe is taken from twelve
/// candidates up.
#[must_use]
pub fn choose_recommended(
    best: Option<&Suggestion>,
    best_candidate: Option<&Suggestion>,
    exact: bool,
    candidate_count: usize,
    guesses_remaining: usize,
    allow_probes: bool,
    config: &RecommenderConfig,
) -> Option<Suggestion> {
    let (best, candidate) = match (best, best_candidate) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => return Some(only.clone()),
        (Some(best), Some(candidate)) => (best, candidate),
    };

    if !allow_probes
        || guesses_remaining <= config.endgame_guesses
        || candidate_count <= config.tiny_candidate_count
    {
        return Some(candidate.clone());
    }
    if best.is_candidate() {
        return Some(best.clone());
    }

    if exact
        && let (Some(best_e), Some(cand_e)) = (best.expected_remaining, candidate.expected_remaining)
    {
        let delta = cand_e - best_e;
        if delta.is_nan() || delta <= 0.0 {
            return Some(candidate.clone());
        }
        if candidate_count >= config.probe_eager_count {
            return Some(best.clone());
        }
        let relative = if cand_e > 0.0 { delta / cand_e } else { 0.0 };
        let worth_it = relative >= config.min_relative_gain || delta >= config.min_absolute_gain;
        return Some(if worth_it { best } else { candidate }.clone());
    }

    if candidate_count >= config.probe_eager_count {
        Some(best.clone())
    } else {
        Some(candidate.clone())
    }
}

/// Coverage-scored pool entry
#[derive(Debug, Clone)]
struct PoolEntry {
    word: Word,
    kind: SuggestionKind,
    coverage: f64,
    language: f64,
    pre_score: f64,
}

/// Running best-of and top-K bookkeeping for one pass
struct Tally {
    top: TopK<Suggestion>,
    best: Option<Suggestion>,
    best_candidate: Option<Suggestion>,
}

impl Tally {
    fn new(max_results: usize) -> Self {
        Self {
            top: TopK::new(max_results),
            best: None,
            best_candidate: None,
        }
    }

    fn consider_best(&mut self, item: &Suggestion) {
        if self.best.as_ref().is_none_or(|b| item.score > b.score) {
            self.best = Some(item.clone());
        }
    }

    fn consider_candidate(&mut self, item: &Suggestion) {
        if item.is_candidate() && self.best_candidate.as_ref().is_none_or(|b| item.score > b.score) {
            self.best_candidate = Some(item.clone());
        }
    }

    /// Merge the two bests into the top list and rank
    fn finish(self, exact: bool) -> PathResult {
        let mut ranked = self.top.into_vec();
        for extra in [&self.best_candidate, &self.best].into_iter().flatten() {
            if !ranked.iter().any(|s| s.word == extra.word) {
                ranked.push(extra.clone());
            }
        }
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        (ranked, self.best, self.best_candidate, exact)
    }
}

/// Skip rules shared by both paths
struct PoolFilter<'a> {
    guessed: FxHashSet<&'a Word>,
    gray: LetterSet,
    probe_banned: LetterSet,
    hide_doubles: bool,
    width: Option<usize>,
}

impl<'a> PoolFilter<'a> {
    fn new(options: &'a RecommendOptions, board: &BoardLetterSets, width: Option<usize>) -> Self {
        let allow = options.effective_allow_probes();
        let mut probe_banned = LetterSet::EMPTY;
        if allow && options.exclude_green_letters {
            probe_banned = probe_banned.union(board.green);
        }
        if allow && options.exclude_yellow_letters {
            probe_banned = probe_banned.union(board.yellow);
        }
        Self {
            guessed: options.already_guessed.iter().collect(),
            gray: board.gray,
            probe_banned,
            hide_doubles: options.hide_double_letters,
            width,
        }
    }

    fn skip(&self, word: &Word, is_candidate: bool) -> bool {
        if self.width.is_some_and(|w| w != word.len()) || self.guessed.contains(word) {
            return true;
        }
        if word.letters().intersects(self.gray) {
            return true;
        }
        !is_candidate
            && ((self.hide_doubles && word.has_duplicate_letters())
                || word.letters().intersects(self.probe_banned))
    }
}

/// Recommend the next guess
///
/// `ctx` supplies the candidate set, letter statistics, usage table, green
/// positions and the partition memo. Returns `None` if `token` is cancelled
/// at any chunk boundary.
pub async fn recommend_next_guess<Y: Yielder>(
    guess_pool: &[Word],
    options: &RecommendOptions,
    board: &BoardLetterSets,
    ctx: &ScoringContext,
    config: &RecommenderConfig,
    token: &CancelToken,
    yielder: &mut Y,
) -> Option<Recommendation> {
    if token.is_cancelled() {
        return None;
    }
    let candidates = ctx.candidates().words();
    if candidates.is_empty() {
        return Some(Recommendation::default());
    }

    let allow_probes = options.effective_allow_probes();
    let pool: &[Word] = if allow_probes && !guess_pool.is_empty() {
        guess_pool
    } else {
        candidates
    };
    let candidate_set: FxHashSet<&Word> = candidates.iter().collect();
    let filter = PoolFilter::new(options, board, candidates.first().map(Word::len));
    let n = candidates.len();

    let (ranked, best, best_candidate, exact) = if n > config.exact_threshold {
        debug!(candidates = n, "recommending with coverage heuristic");
        fast_path(pool, &candidate_set, allow_probes, &filter, ctx, config, token, yielder).await?
    } else {
        let desired_k = if allow_probes {
            config.shortlist_size.min(pool.len())
        } else {
            pool.len()
        };
        let cost = n.saturating_mul(n).saturating_add(desired_k.saturating_mul(n));
        if cost > config.budget {
            info!(
                candidates = n,
                cost,
                budget = config.budget,
                "exact search over budget, using coverage heuristic"
            );
            fast_path(pool, &candidate_set, allow_probes, &filter, ctx, config, token, yielder)
                .await?
        } else {
            debug!(candidates = n, shortlist = desired_k, "recommending with exact partitions");
            let scope = ExactScope {
                pool,
                candidate_set: &candidate_set,
                allow_probes,
                desired_k,
                filter: &filter,
            };
            exact_path(&scope, ctx, config, token, yielder).await?
        }
    };

    let recommended = choose_recommended(
        best.as_ref(),
        best_candidate.as_ref(),
        exact,
        n,
        options.guesses_remaining(config),
        allow_probes,
        config,
    );

    Some(Recommendation {
        ranked,
        best,
        best_candidate,
        recommended,
        exact,
    })
}

type PathResult = (Vec<Suggestion>, Option<Suggestion>, Option<Suggestion>, bool);

fn pool_entry(word: &Word, is_candidate: bool, ctx: &ScoringContext, config: &RecommenderConfig) -> PoolEntry {
    let coverage = coverage(word, ctx);
    let language = ctx.usage().language_score(word);
    PoolEntry {
        word: word.clone(),
        kind: if is_candidate {
            SuggestionKind::Candidate
        } else {
            SuggestionKind::Probe
        },
        coverage,
        language,
        pre_score: coverage + config.language_weight * language,
    }
}

#[allow(clippy::too_many_arguments)]
async fn fast_path<Y: Yielder>(
    pool: &[Word],
    candidate_set: &FxHashSet<&Word>,
    allow_probes: bool,
    filter: &PoolFilter<'_>,
    ctx: &ScoringContext,
    config: &RecommenderConfig,
    token: &CancelToken,
    yielder: &mut Y,
) -> Option<PathResult> {
    let mut tally = Tally::new(config.max_results);
    let chunk = config.scheduler.scan_chunk(pool.len()).max(1);

    for batch in pool.chunks(chunk) {
        if token.is_cancelled() {
            return None;
        }
        for word in batch {
            let is_candidate = candidate_set.contains(word);
            if (!allow_probes && !is_candidate) || filter.skip(word, is_candidate) {
                continue;
            }
            let entry = pool_entry(word, is_candidate, ctx, config);
            let item = Suggestion {
                word: entry.word,
                kind: entry.kind,
                score: entry.pre_score,
                expected_remaining: None,
                coverage: entry.coverage,
            };
            tally.consider_best(&item);
            tally.consider_candidate(&item);
            tally.top.push(item.score, item);
        }
        yielder.yield_now().await;
    }

    Some(tally.finish(false))
}

struct ExactScope<'a> {
    pool: &'a [Word],
    candidate_set: &'a FxHashSet<&'a Word>,
    allow_probes: bool,
    desired_k: usize,
    filter: &'a PoolFilter<'a>,
}

async fn exact_path<Y: Yielder>(
    scope: &ExactScope<'_>,
    ctx: &ScoringContext,
    config: &RecommenderConfig,
    token: &CancelToken,
    yielder: &mut Y,
) -> Option<PathResult> {
    let use_shortlist = scope.allow_probes && scope.pool.len() > scope.desired_k;
    let mut shortlist = TopK::new(scope.desired_k);
    let mut all = Vec::new();

    let chunk = config.scheduler.scan_chunk(scope.pool.len()).max(1);
    for batch in scope.pool.chunks(chunk) {
        if token.is_cancelled() {
            return None;
        }
        for word in batch {
            let is_candidate = scope.candidate_set.contains(word);
            if (!scope.allow_probes && !is_candidate) || scope.filter.skip(word, is_candidate) {
                continue;
            }
            let entry = pool_entry(word, is_candidate, ctx, config);
            if use_shortlist {
                shortlist.push(entry.pre_score, entry);
            } else {
                all.push(entry);
            }
        }
        yielder.yield_now().await;
    }
    let shortlist = if use_shortlist { shortlist.into_vec() } else { all };

    let exact_score = |e: f64, coverage: f64, language: f64| {
        -e + config.exact_coverage_weight * coverage + config.exact_language_weight * language
    };

    let mut tally = Tally::new(config.max_results);
    let exact_chunk = config.scheduler.exact_chunk.max(1);

    for batch in ctx.candidates().words().chunks(exact_chunk) {
        if token.is_cancelled() {
            return None;
        }
        for word in batch {
            if scope.filter.skip(word, true) {
                continue;
            }
            let entry = pool_entry(word, true, ctx, config);
            let e = ctx.partition(word).expected_remaining();
            let item = Suggestion {
                word: entry.word,
                kind: SuggestionKind::Candidate,
                score: exact_score(e, entry.coverage, entry.language),
                expected_remaining: Some(e),
                coverage: entry.coverage,
            };
            tally.consider_candidate(&item);
        }
        yielder.yield_now().await;
    }

    for batch in shortlist.chunks(exact_chunk) {
        if token.is_cancelled() {
            return None;
        }
        for entry in batch {
            let e = ctx.partition(&entry.word).expected_remaining();
            let item = Suggestion {
                word: entry.word.clone(),
                kind: entry.kind,
                score: exact_score(e, entry.coverage, entry.language),
                expected_remaining: Some(e),
                coverage: entry.coverage,
            };
            tally.consider_best(&item);
            tally.top.push(item.score, item);
        }
        yielder.yield_now().await;
    }

    Some(tally.finish(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateSet;
    use crate::constraints::Board;
    use crate::solver::scheduler::NoYield;
    use crate::solver::tables::UsageTable;
    use std::sync::Arc;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    fn context(list: &[&str]) -> ScoringContext {
        ScoringContext::build(
            CandidateSet::new(words(list), 1),
            Arc::new(UsageTable::empty()),
            vec![None; 5],
        )
    }

    fn suggestion(word: &str, kind: SuggestionKind, e: Option<f64>) -> Suggestion {
        Suggestion {
            word: Word::new(word).unwrap(),
            kind,
            score: e.map_or(0.0, |e| -e),
            expected_remaining: e,
            coverage: 0.0,
        }
    }

    const CANDIDATES: [&str; 8] = [
        "batch", "catch", "hatch", "latch", "match", "patch", "watch", "natch",
    ];
    const PROBES: [&str; 4] = ["clamp", "blown", "plumb", "wombs"];

    fn full_pool() -> Vec<Word> {
        words(&CANDIDATES)
            .into_iter()
            .chain(words(&PROBES))
            .collect()
    }

    async fn run(
        pool: &[Word],
        options: &RecommendOptions,
        ctx: &ScoringContext,
        config: &RecommenderConfig,
    ) -> Recommendation {
        recommend_next_guess(
            pool,
            options,
            &BoardLetterSets::default(),
            ctx,
            config,
            &CancelToken::new(),
            &mut NoYield,
        )
        .await
        .unwrap()
    }

    #[test]
    fn policy_tiny_candidate_set_prefers_candidate() {
        let config = RecommenderConfig::default();
        let probe = suggestion("clamp", SuggestionKind::Probe, Some(1.0));
        let cand = suggestion("batch", SuggestionKind::Candidate, Some(2.0));
        let chosen = choose_recommended(Some(&probe), Some(&cand), true, 3, 5, true, &config);
        assert_eq!(chosen, Some(cand));
    }

    #[test]
    fn policy_missing_sides() {
        let config = RecommenderConfig::default();
        let probe = suggestion("clamp", SuggestionKind::Probe, None);
        assert_eq!(choose_recommended(None, None, false, 50, 6, true, &config), None);
        assert_eq!(
            choose_recommended(Some(&probe), None, false, 50, 6, true, &config),
            Some(probe.clone())
        );
        assert_eq!(
            choose_recommended(None, Some(&probe), false, 50, 6, true, &config),
            Some(probe)
        );
    }

    #[test]
    fn policy_endgame_and_hard_mode() {
        let config = RecommenderConfig::default();
        let probe = suggestion("clamp", SuggestionKind::Probe, Some(1.0));
        let cand = suggestion("batch", SuggestionKind::Candidate, Some(5.0));
        assert!(choose_recommended(Some(&probe), Some(&cand), true, 50, 2, true, &config).unwrap().is_candidate());
        assert!(choose_recommended(Some(&probe), Some(&cand), true, 50, 6, false, &config).unwrap().is_candidate());
        assert!(!choose_recommended(Some(&probe), Some(&cand), true, 50, 6, true, &config).unwrap().is_candidate());
    }

    #[test]
    fn policy_exact_thresholds() {
        let config = RecommenderConfig::default();
        let cand = suggestion("batch", SuggestionKind::Candidate, Some(2.0));

        // no improvement
        let probe = suggestion("clamp", SuggestionKind::Probe, Some(2.0));
        assert!(choose_recommended(Some(&probe), Some(&cand), true, 8, 6, true, &config).unwrap().is_candidate());

        // 2% and 0.04 absolute: not enough below twelve candidates
        let probe = suggestion("clamp", SuggestionKind::Probe, Some(1.96));
        assert!(choose_recommended(Some(&probe), Some(&cand), true, 8, 6, true, &config).unwrap().is_candidate());
        // ...but any gain counts from twelve up
        assert!(!choose_recommended(Some(&probe), Some(&cand), true, 12, 6, true, &config).unwrap().is_candidate());

        // 10% relative
        let probe = suggestion("clamp", SuggestionKind::Probe, Some(1.8));
        assert!(!choose_recommended(Some(&probe), Some(&cand), true, 8, 6, true, &config).unwrap().is_candidate());
    }

    #[test]
    fn policy_heuristic_mode() {
        let config = RecommenderConfig::default();
        let probe = suggestion("clamp", SuggestionKind::Probe, None);
        let cand = suggestion("batch", SuggestionKind::Candidate, None);
        assert!(choose_recommended(Some(&probe), Some(&cand), false, 11, 6, true, &config).unwrap().is_candidate());
        assert!(!choose_recommended(Some(&probe), Some(&cand), false, 12, 6, true, &config).unwrap().is_candidate());
    }

    #[tokio::test]
    async fn candidate_count_three_recommends_candidate() {
        let ctx = context(&["batch", "catch", "hatch"]);
        let pool = full_pool();
        let rec = run(&pool, &RecommendOptions::normal(), &ctx, &RecommenderConfig::default()).await;
        let chosen = rec.recommended.unwrap();
        assert!(chosen.is_candidate());
        assert_eq!(Some(chosen), rec.best_candidate);
    }

    #[tokio::test]
    async fn exact_path_finds_splitting_probe() {
        // eight -atch words: a probe covering several first letters splits them
        let ctx = context(&CANDIDATES);
        let rec = run(&full_pool(), &RecommendOptions::normal(), &ctx, &RecommenderConfig::default()).await;
        assert!(rec.exact);

        let best = rec.best.clone().unwrap();
        let cand = rec.best_candidate.clone().unwrap();
        assert!(best.expected_remaining.unwrap() < cand.expected_remaining.unwrap());
        assert!(!best.is_candidate());
        // 8 candidates: the gain is large enough to take the probe
        assert_eq!(rec.recommended.as_ref().unwrap().word, best.word);
        assert_eq!(rec.ordered()[0].word, best.word);
    }

    #[tokio::test]
    async fn hard_mode_never_suggests_probes() {
        let ctx = context(&CANDIDATES);
        let options = RecommendOptions {
            solve_mode: SolveMode::Hard,
            ..RecommendOptions::normal()
        };
        let rec = run(&full_pool(), &options, &ctx, &RecommenderConfig::default()).await;
        assert!(rec.ranked.iter().all(Suggestion::is_candidate));
        assert!(rec.recommended.unwrap().is_candidate());
    }

    #[tokio::test]
    async fn already_guessed_and_gray_letters_are_skipped() {
        let ctx = context(&CANDIDATES);
        let options = RecommendOptions {
            already_guessed: words(&["batch"]),
            ..RecommendOptions::normal()
        };
        let board = Board::from_confirmed(5, &["blown:BBBBB".parse().unwrap()]).letter_sets();
        let rec = recommend_next_guess(
            &full_pool(),
            &options,
            &board,
            &ctx,
            &RecommenderConfig::default(),
            &CancelToken::new(),
            &mut NoYield,
        )
        .await
        .unwrap();

        for s in &rec.ranked {
            assert_ne!(s.word.text(), "batch");
            assert!(!s.word.letters().intersects(board.gray), "{}", s.word);
        }
    }

    #[tokio::test]
    async fn hide_doubles_only_prunes_probes() {
        let ctx = context(&["geese", "eerie", "crane"]);
        let pool = words(&["geese", "eerie", "crane", "sheep", "slate"]);
        let options = RecommendOptions {
            hide_double_letters: true,
            ..RecommendOptions::normal()
        };
        let rec = run(&pool, &options, &ctx, &RecommenderConfig::default()).await;
        let names: Vec<&str> = rec.ranked.iter().map(|s| s.word.text()).collect();
        assert!(names.contains(&"geese"));
        assert!(!names.contains(&"sheep"));
        assert!(names.contains(&"slate"));
    }

    #[tokio::test]
    async fn over_threshold_uses_fast_path() {
        let ctx = context(&CANDIDATES);
        let config = RecommenderConfig::default().with_exact_threshold(4);
        let rec = run(&full_pool(), &RecommendOptions::normal(), &ctx, &config).await;
        assert!(!rec.exact);
        assert!(rec.ranked.iter().all(|s| s.expected_remaining.is_none()));
        assert!(rec.best_candidate.is_some());
    }

    #[tokio::test]
    async fn over_budget_degrades_to_fast_path() {
        let ctx = context(&CANDIDATES);
        let config = RecommenderConfig::default().with_budget(10);
        let rec = run(&full_pool(), &RecommendOptions::normal(), &ctx, &config).await;
        assert!(!rec.exact);
    }

    #[tokio::test]
    async fn ranked_list_is_bounded_but_keeps_bests() {
        let ctx = context(&CANDIDATES);
        let config = RecommenderConfig::default().with_max_results(1);
        let rec = run(&full_pool(), &RecommendOptions::normal(), &ctx, &config).await;
        assert!(rec.ranked.len() <= 2);
        let best = rec.best.unwrap();
        let cand = rec.best_candidate.unwrap();
        assert!(rec.ranked.iter().any(|s| s.word == best.word));
        assert!(rec.ranked.iter().any(|s| s.word == cand.word));
        assert!(rec.ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn cancelled_pass_returns_none() {
        let ctx = context(&CANDIDATES);
        let token = CancelToken::new();
        token.cancel();
        let rec = recommend_next_guess(
            &full_pool(),
            &RecommendOptions::normal(),
            &BoardLetterSets::default(),
            &ctx,
            &RecommenderConfig::default(),
            &token,
            &mut NoYield,
        )
        .await;
        assert!(rec.is_none());
    }

    #[tokio::test]
    async fn empty_candidates_give_empty_recommendation() {
        let ctx = context(&[]);
        let rec = run(&full_pool(), &RecommendOptions::normal(), &ctx, &RecommenderConfig::default()).await;
        assert!(rec.ranked.is_empty());
        assert!(rec.recommended.is_none());
    }
}
