//! Board state to candidate constraints
//!
//! - [`board`]: rows, confirmation and the letters they reveal
//! - [`filters`]: free-text include / exclude filters
//! - [`resolver`]: folding both into a [`Constraint`] and filtering words
//! - [`hard_mode`]: legality of a guess under hard-mode rules

pub mod board;
pub mod filters;
pub mod hard_mode;
pub mod resolver;

pub use board::{Board, BoardLetterSets, BoardRow, ConfirmedRow};
pub use filters::{FreeTextFilters, PositionFilters};
pub use hard_mode::{HardModeConstraints, HardModeVerdict, validate_hard_mode_guess};
pub use resolver::{Constraint, filter_candidates, resolve_constraints};
