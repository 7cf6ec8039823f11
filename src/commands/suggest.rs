//! Next-guess suggestion command

use super::WordPools;
use crate::constraints::{Board, FreeTextFilters};
use crate::core::Word;
use crate::solver::{Recommendation, RecommendOptions, RecommenderConfig, Yielder};
use std::sync::Arc;

/// Candidates left on the board and the suggested next guess
#[derive(Debug, Clone)]
pub struct SuggestResult {
    pub candidates: Vec<Word>,
    pub recommendation: Arc<Recommendation>,
}

/// Filter the answers against `board` and recommend a next guess
///
/// Returns `None` only if the pass is cancelled.
pub async fn suggest<Y: Yielder>(
    pools: &WordPools,
    board: &Board,
    filters: &FreeTextFilters,
    options: &RecommendOptions,
    config: RecommenderConfig,
    yielder: &mut Y,
) -> Option<SuggestResult> {
    let mut session = pools.session(config);
    session.apply_board(board, filters);
    let recommendation = session.recommend(options, yielder).await?;
    Some(SuggestResult {
        candidates: session.candidates().words().to_vec(),
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_board;
    use crate::solver::{NoYield, SolveMode, UsageTable};
    use crate::wordlists::words_from_slice;

    fn pools() -> WordPools {
        WordPools::new(
            words_from_slice(&["crane", "slate", "trace", "batch", "catch", "hatch", "latch", "match"]),
            words_from_slice(&["clamp", "plumb"]),
            UsageTable::empty(),
        )
    }

    #[tokio::test]
    async fn suggests_from_remaining_candidates() {
        let board = parse_board(5, &["crane:BBGBG".to_string()]).unwrap();
        let result = suggest(
            &pools(),
            &board,
            &FreeTextFilters::default(),
            &RecommendOptions::normal(),
            RecommenderConfig::default(),
            &mut NoYield,
        )
        .await
        .unwrap();

        assert_eq!(result.candidates, words_from_slice(&["slate"]));
        let chosen = result.recommendation.recommended.as_ref().unwrap();
        assert_eq!(chosen.word.text(), "slate");
    }

    #[tokio::test]
    async fn hard_mode_suggests_candidates_only() {
        let options = RecommendOptions {
            solve_mode: SolveMode::Hard,
            ..RecommendOptions::normal()
        };
        let result = suggest(
            &pools(),
            &Board::new(5),
            &FreeTextFilters::default(),
            &options,
            RecommenderConfig::default(),
            &mut NoYield,
        )
        .await
        .unwrap();
        assert!(result.recommendation.ranked.iter().all(|s| s.is_candidate()));
    }
}
