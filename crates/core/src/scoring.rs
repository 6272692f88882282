//! Scoring module - points per landing and the score-derived level
//!
//! Every landed piece is worth a flat [`LANDING_POINTS`]; clearing `n` rows
//! with it adds `LINE_BONUS * n * (n + 1)`. The level is the score divided by
//! a divisor, capped at [`MAX_LEVEL`].

use crate::types::{LANDING_POINTS, LINE_BONUS, MAX_LEVEL};

/// Points for one landing that cleared `lines` rows.
///
/// ```
/// use tile_tetris_core::scoring::landing_points;
///
/// assert_eq!(landing_points(0), 100);
/// assert_eq!(landing_points(4), 1100);
/// ```
pub fn landing_points(lines: u32) -> u32 {
    let bonus = LINE_BONUS
        .saturating_mul(lines)
        .saturating_mul(lines.saturating_add(1));
    LANDING_POINTS.saturating_add(bonus)
}

/// Level reached at `score`, in `0..=MAX_LEVEL`.
///
/// A zero divisor is treated as 1.
pub fn level_for_score(score: u32, divisor: u32) -> u32 {
    (score / divisor.max(1)).min(MAX_LEVEL)
}
