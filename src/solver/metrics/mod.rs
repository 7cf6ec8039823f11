//! Partition-based information metrics
//!
//! A guess splits the candidate set into buckets by the pattern it would
//! produce against each candidate. Entropy, expected remaining and minimax
//! are all read off that partition, so partitions are memoized per
//! (guess, candidate-set version).

mod cache;
mod calculator;
mod partition;

pub use cache::PartitionCache;
pub use calculator::{GuessMetrics, shannon_entropy};
pub use partition::Partition;
