//! Hard-mode guess check

use crate::constraints::{Board, HardModeConstraints, HardModeVerdict, validate_hard_mode_guess};

/// Check whether `guess` is legal in hard mode after the rows of `board`
#[must_use]
pub fn check_guess(board: &Board, guess: &str) -> HardModeVerdict {
    let constraints = HardModeConstraints::from_rows(&board.confirmed_rows());
    validate_hard_mode_guess(guess, board.width(), &constraints)
}
