//! Scoring and recommendation
//!
//! - [`metrics`]: partitions and the information metrics read off them
//! - [`strategy`]: the tagged scoring strategies and blends
//! - [`scheduler`]: chunked, cancelable scoring passes
//! - [`recommender`]: next-guess search and the candidate-vs-probe policy
//! - [`session`]: the state of one game, with caches and cancellation

pub mod metrics;
pub mod ranking;
pub mod recommender;
pub mod scheduler;
pub mod session;
pub mod strategy;
pub mod tables;

pub use metrics::{GuessMetrics, Partition, PartitionCache};
pub use ranking::{SortMode, TopK, hide_double_letters, sort_scores};
pub use recommender::{
    Recommendation, RecommendOptions, RecommenderConfig, SolveMode, Suggestion, SuggestionKind,
    choose_recommended, recommend_next_guess,
};
pub use scheduler::{CancelToken, NoYield, SchedulerConfig, TokenSlot, TokioYield, Yielder, score_words};
pub use session::{
    RecommendBatch, RecommendKey, RecommendPass, RecommendRequest, ScoreBatch, ScorePass,
    ScoreRequest, SolverSession,
};
pub use strategy::{
    BlendSpec, ScoreMode, ScoredWord, ScoringContext, Strategy, binary_entropy, score_all,
    score_word,
};
pub use tables::UsageTable;
