//! Scoring module - line clears, hard drops, levels and gravity
//!
//! - A lock that clears `n` rows is worth `n * 100 * level`, using the level
//!   in effect before the clear is counted.
//! - A hard drop is worth 2 points per row travelled.
//! - The level is `lines / 10 + 1`.
//! - Gravity fires every `max(50, 1000 - (level - 1) * 100)` ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_CELL,
    LINES_PER_LEVEL, LINE_CLEAR_POINTS, STARTING_LEVEL,
};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points for the rows cleared by this lock
    pub line_clear_score: u32,
    /// Points for the hard drop that led to this lock (0 for gravity locks)
    pub drop_score: u32,
    pub total: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared (0-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(LINE_CLEAR_POINTS)
        .saturating_mul(level)
}

/// Calculate hard drop score: 2 points per cell
pub fn calculate_drop_score(cells: u32) -> u32 {
    cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Calculate complete score for one lock
pub fn calculate_score(lines: u32, level: u32, hard_drop_cells: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    let drop_score = calculate_drop_score(hard_drop_cells);
    ScoreResult {
        line_clear_score,
        drop_score,
        total: line_clear_score.saturating_add(drop_score),
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + STARTING_LEVEL
}

/// Get drop interval for a level (in milliseconds)
/// Decreases by 100ms per level, clamped at the 50ms floor
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level
        .saturating_sub(STARTING_LEVEL)
        .saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(4, 1), 400);
        assert_eq!(calculate_line_score(2, 3), 600);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(0), 0);
        assert_eq!(calculate_drop_score(19), 38);
    }

    #[test]
    fn test_full_score_calculation() {
        let result = calculate_score(1, 2, 10);
        assert_eq!(result.line_clear_score, 200);
        assert_eq!(result.drop_score, 20);
        assert_eq!(result.total, 220);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(2), 900);
        assert_eq!(get_drop_interval_ms(10), 100);
        assert_eq!(get_drop_interval_ms(11), 50);
        assert_eq!(get_drop_interval_ms(500), 50);
        // Level 0 never happens in play; treat it like level 1.
        assert_eq!(get_drop_interval_ms(0), 1000);
    }
}
