//! Cooperative, cancelable scoring
//!
//! Long passes are split into chunks. Between chunks the pass hands control
//! back through a [`Yielder`] and checks its [`CancelToken`]; a cancelled
//! pass returns `None` and never partial results. Suspension never happens
//! inside the scoring of a single word.

use super::strategy::{ScoreMode, ScoredWord, ScoringContext, Strategy, combine_blend, score_word};
use crate::core::Word;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Shared cancellation flag for one pass
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Holds the active token of one family of passes
///
/// Renewing cancels whatever pass held the previous token.
#[derive(Debug, Default)]
pub struct TokenSlot {
    current: Option<CancelToken>,
}

impl TokenSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous token and hand out a fresh one
    pub fn renew(&mut self) -> CancelToken {
        self.cancel();
        let token = CancelToken::new();
        self.current = Some(token.clone());
        token
    }

    /// Cancel the active token, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    /// True if `token` is the one currently held
    #[must_use]
    pub fn is_current(&self, token: &CancelToken) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| Arc::ptr_eq(&t.cancelled, &token.cancelled))
    }
}

/// Hands control back to the host between chunks
pub trait Yielder {
    fn yield_now(&mut self) -> impl Future<Output = ()>;
}

/// Yields to the tokio scheduler
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioYield;

impl Yielder for TokioYield {
    async fn yield_now(&mut self) {
        tokio::task::yield_now().await;
    }
}

/// Never suspends; for synchronous callers and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoYield;

impl Yielder for NoYield {
    async fn yield_now(&mut self) {}
}

/// Chunk sizes for cooperative passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pools larger than this use the smaller chunk sizes
    pub large_pool: usize,
    /// Heavy-strategy chunk for large pools (default: 6)
    pub heavy_chunk_large: usize,
    /// Heavy-strategy chunk otherwise (default: 12)
    pub heavy_chunk_small: usize,
    /// Recommender scan chunk for large pools (default: 60)
    pub scan_chunk_large: usize,
    /// Recommender scan chunk otherwise (default: 120)
    pub scan_chunk_small: usize,
    /// Exact partition evaluations between yields (default: 24)
    pub exact_chunk: usize,
}

impl SchedulerConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            large_pool: 1500,
            heavy_chunk_large: 6,
            heavy_chunk_small: 12,
            scan_chunk_large: 60,
            scan_chunk_small: 120,
            exact_chunk: 24,
        }
    }

    #[must_use]
    pub const fn heavy_chunk(&self, pool: usize) -> usize {
        if pool > self.large_pool {
            self.heavy_chunk_large
        } else {
            self.heavy_chunk_small
        }
    }

    #[must_use]
    pub const fn scan_chunk(&self, pool: usize) -> usize {
        if pool > self.large_pool {
            self.scan_chunk_large
        } else {
            self.scan_chunk_small
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One strategy's scores for every word, or `None` if cancelled
async fn score_column<Y: Yielder>(
    strategy: Strategy,
    words: &[Word],
    ctx: &ScoringContext,
    token: &CancelToken,
    yielder: &mut Y,
    config: &SchedulerConfig,
) -> Option<Vec<f64>> {
    if token.is_cancelled() {
        return None;
    }

    if !strategy.is_heavy() {
        let column: Vec<f64> = words.iter().map(|w| score_word(strategy, w, ctx)).collect();
        yielder.yield_now().await;
        return (!token.is_cancelled()).then_some(column);
    }

    let chunk = config.heavy_chunk(words.len()).max(1);
    let mut column = Vec::with_capacity(words.len());
    for (i, batch) in words.chunks(chunk).enumerate() {
        if token.is_cancelled() {
            debug!(%strategy, chunk = i, "scoring pass cancelled");
            return None;
        }
        column.extend(batch.iter().map(|w| score_word(strategy, w, ctx)));
        yielder.yield_now().await;
    }

    (!token.is_cancelled()).then_some(column)
}

/// Score `words` under `mode`, yielding between chunks
///
/// Returns `None` if `token` is cancelled at any chunk boundary. Blends
/// score each distinct constituent once and check the token between them.
pub async fn score_words<Y: Yielder>(
    words: &[Word],
    mode: &ScoreMode,
    ctx: &ScoringContext,
    token: &CancelToken,
    yielder: &mut Y,
    config: &SchedulerConfig,
) -> Option<Vec<ScoredWord>> {
    match mode {
        ScoreMode::Single(strategy) => {
            let column = score_column(*strategy, words, ctx, token, yielder, config).await?;
            Some(
                words
                    .iter()
                    .zip(column)
                    .map(|(word, score)| ScoredWord {
                        word: word.clone(),
                        score,
                    })
                    .collect(),
            )
        }
        ScoreMode::Blend(blend) => {
            let mut columns = Vec::new();
            for strategy in blend.distinct() {
                if token.is_cancelled() {
                    return None;
                }
                columns.push(score_column(strategy, words, ctx, token, yielder, config).await?);
            }
            Some(combine_blend(blend, words, &columns))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateSet;
    use crate::solver::strategy::{BlendSpec, score_all};
    use crate::solver::tables::UsageTable;

    /// Counts yields and cancels the token after a fixed number of them
    struct CancelAfter {
        token: CancelToken,
        remaining: usize,
        yields: usize,
    }

    impl Yielder for CancelAfter {
        async fn yield_now(&mut self) {
            self.yields += 1;
            if self.remaining == 0 {
                self.token.cancel();
            } else {
                self.remaining -= 1;
            }
        }
    }

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

    const POOL: [&str; 14] = [
        "crane", "slate", "trace", "irate", "stare", "arise", "raise", "least", "steal", "tales",
        "rates", "aster", "tears", "teary",
    ];

    #[test]
    fn token_slot_cancels_previous() {
        let mut slot = TokenSlot::new();
        let first = slot.renew();
        let second = slot.renew();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(slot.is_current(&second));
        assert!(!slot.is_current(&first));

        slot.cancel();
        assert!(second.is_cancelled());
    }

    #[test]
    fn chunk_sizes() {
        let config = SchedulerConfig::default();
        assert_eq!(config.heavy_chunk(2000), 6);
        assert_eq!(config.heavy_chunk(1500), 12);
        assert_eq!(config.scan_chunk(1501), 60);
        assert_eq!(config.scan_chunk(10), 120);
    }

    #[tokio::test]
    async fn matches_synchronous_scoring() {
        let ctx = context(&POOL);
        let pool = words(&POOL);
        let mode = ScoreMode::Blend(BlendSpec::slider(Strategy::Frequency, Strategy::Expected, 0.4));

        let scored = score_words(
            &pool,
            &mode,
            &ctx,
            &CancelToken::new(),
            &mut TokioYield,
            &SchedulerConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(scored, score_all(&pool, &mode, &ctx));
    }

    #[tokio::test]
    async fn heavy_strategy_yields_per_chunk() {
        let ctx = context(&POOL);
        let pool = words(&POOL);
        let token = CancelToken::new();
        let mut yielder = CancelAfter {
            token: token.clone(),
            remaining: usize::MAX,
            yields: 0,
        };

        let scored = score_words(
            &pool,
            &ScoreMode::Single(Strategy::Entropy),
            &ctx,
            &token,
            &mut yielder,
            &SchedulerConfig::default(),
        )
        .await;
        assert_eq!(scored.map(|s| s.len()), Some(14));
        // 14 words in chunks of 12
        assert_eq!(yielder.yields, 2);
    }

    #[tokio::test]
    async fn cancellation_returns_none() {
        let ctx = context(&POOL);
        let pool = words(&POOL);
        let token = CancelToken::new();
        let mut yielder = CancelAfter {
            token: token.clone(),
            remaining: 0,
            yields: 0,
        };

        let scored = score_words(
            &pool,
            &ScoreMode::Single(Strategy::Minimax),
            &ctx,
            &token,
            &mut yielder,
            &SchedulerConfig::default(),
        )
        .await;
        assert!(scored.is_none());
        assert_eq!(yielder.yields, 1);
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let ctx = context(&POOL);
        let token = CancelToken::new();
        token.cancel();
        let scored = score_words(
            &words(&POOL),
            &ScoreMode::Single(Strategy::Presence),
            &ctx,
            &token,
            &mut NoYield,
            &SchedulerConfig::default(),
        )
        .await;
        assert!(scored.is_none());
    }

    #[tokio::test]
    async fn blend_cancelled_between_constituents() {
        let ctx = context(&POOL);
        let token = CancelToken::new();
        let mut yielder = CancelAfter {
            token: token.clone(),
            remaining: 0,
            yields: 0,
        };
        let mode = ScoreMode::Blend(BlendSpec::slider(Strategy::Presence, Strategy::Probe, 0.5));
        let scored = score_words(
            &words(&POOL),
            &mode,
            &ctx,
            &token,
            &mut yielder,
            &SchedulerConfig::default(),
        )
        .await;
        assert!(scored.is_none());
        assert_eq!(yielder.yields, 1);
    }
}
