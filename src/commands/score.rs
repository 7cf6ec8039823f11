//! Candidate scoring command

use super::WordPools;
use crate::constraints::{Board, FreeTextFilters};
use crate::solver::{
    RecommenderConfig, ScoreMode, ScoredWord, SortMode, Yielder, hide_double_letters, sort_scores,
};

/// Display options for a scored list
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub mode: ScoreMode,
    pub sort: SortMode,
    /// Rows to keep after sorting; `None` keeps all
    pub top: Option<usize>,
    pub hide_doubles: bool,
}

impl ScoreConfig {
    #[must_use]
    pub fn new(mode: ScoreMode) -> Self {
        Self {
            mode,
            sort: SortMode::default(),
            top: None,
            hide_doubles: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub mode: ScoreMode,
    pub candidate_count: usize,
    pub rows: Vec<ScoredWord>,
}

/// Score every remaining candidate under `config.mode`
///
/// Returns `None` only if the pass is cancelled.
pub async fn score_candidates<Y: Yielder>(
    pools: &WordPools,
    board: &Board,
    filters: &FreeTextFilters,
    config: &ScoreConfig,
    yielder: &mut Y,
) -> Option<ScoreResult> {
    let mut session = pools.session(RecommenderConfig::default());
    session.apply_board(board, filters);
    let scores = session.score(&config.mode, yielder).await?;

    let mut rows = sort_scores(&scores, config.sort);
    if config.hide_doubles {
        rows = hide_double_letters(rows);
    }
    if let Some(top) = config.top {
        rows.truncate(top);
    }

    Some(ScoreResult {
        mode: config.mode.clone(),
        candidate_count: scores.len(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{NoYield, Strategy, UsageTable};
    use crate::wordlists::words_from_slice;

    fn pools() -> WordPools {
        WordPools::new(
            words_from_slice(&["geese", "crane", "slate", "trace", "irate"]),
            Vec::new(),
            UsageTable::empty(),
        )
    }

    #[tokio::test]
    async fn sorted_and_truncated() {
        let mut config = ScoreConfig::new(ScoreMode::Single(Strategy::Frequency));
        config.top = Some(3);
        let result = score_candidates(&pools(), &Board::new(5), &FreeTextFilters::default(), &config, &mut NoYield)
            .await
            .unwrap();

        assert_eq!(result.candidate_count, 5);
        assert_eq!(result.rows.len(), 3);
        assert!(result.rows.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn hide_doubles_drops_repeated_letters() {
        let mut config = ScoreConfig::new(ScoreMode::Single(Strategy::Entropy));
        config.hide_doubles = true;
        config.sort = SortMode::Lowest;
        let result = score_candidates(&pools(), &Board::new(5), &FreeTextFilters::default(), &config, &mut NoYield)
            .await
            .unwrap();

        assert_eq!(result.rows.len(), 4);
        assert!(result.rows.iter().all(|r| r.word.text() != "geese"));
    }
}
