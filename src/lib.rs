//! Wordle Advisor
//!
//! Constraint filtering, information-theoretic scoring and cancelable
//! next-guess recommendation for Wordle-style puzzles of 3 to 7 letters.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_advisor::core::{Pattern, Word};
//!
//! let guess = Word::new("crane").unwrap();
//! let answer = Word::new("slate").unwrap();
//!
//! let pattern = Pattern::calculate(&guess, &answer);
//! assert_eq!(pattern.to_string(), "BBGBG");
//! ```

// Core domain types
pub mod core;

// Versioned candidate sets
pub mod candidates;

// Board rows, filters and hard mode
pub mod constraints;

// Scoring, scheduling and recommendation
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

pub mod error;
pub mod logging;

pub use error::{AdvisorError, Result};
