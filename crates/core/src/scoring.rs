//! Scoring rules for line clears
//!
//! Points are awarded per lock from a fixed table; clearing more lines at
//! once pays superlinearly. The same clear count also sets the length of
//! the post-clear pause.

use blockfall_types::{LINE_CLEAR_PAUSE_MS, LINE_SCORES};

/// Points for clearing `lines` rows with a single lock
///
/// Counts beyond four are impossible for tetrominoes and score zero.
pub fn line_clear_points(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Pause after a lock, 200 ms per cleared row
///
/// A lock that clears nothing pauses for nothing.
pub fn lock_pause_ms(lines: usize) -> u32 {
    lines as u32 * LINE_CLEAR_PAUSE_MS
}
