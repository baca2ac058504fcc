//! Ball vs catcher tests
//!
//! The catcher is treated as a horizontal band near the bottom of the canvas.
//! A ball counts as caught once its center is below the band line and strictly
//! inside the catcher's half-width window.

use super::state::{Ball, Catcher};
use crate::consts::{CANVAS_HEIGHT, CATCH_BAND_OFFSET};

/// Outcome of testing one ball after it moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchResult {
    /// Still in play
    Falling,
    /// Landed in the catcher
    Caught,
    /// Fell past the bottom edge
    Missed,
}

/// Classify a ball against the catcher. Catch wins over miss.
pub fn catch_test(ball: &Ball, catcher: &Catcher) -> CatchResult {
    let band_y = CANVAS_HEIGHT - CATCH_BAND_OFFSET;
    let half = catcher.half_width();

    let in_band = ball.y > band_y;
    let in_window = ball.x > catcher.x - half && ball.x < catcher.x + half;

    if in_band && in_window {
        CatchResult::Caught
    } else if ball.y > CANVAS_HEIGHT {
        CatchResult::Missed
    } else {
        CatchResult::Falling
    }
}
