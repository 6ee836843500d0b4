//! Scoring module - line clear points, garbage attacks and speed curve

use crate::types::{
    DROP_INTERVAL_MIN_MS, GARBAGE_FOR_LINES, INITIAL_DROP_INTERVAL_MS, LEVEL_BONUS_PER_LINE,
    LINES_PER_LEVEL, SCORE_DOUBLE, SCORE_SINGLE, SCORE_TETRIS, SCORE_TRIPLE, SPEED_FACTOR,
};

/// Points for clearing `lines` rows in one lock at `level` (the level before
/// the lock is applied).
///
/// Base table 100/300/500/800 plus `(level - 1) * lines * 10`. Anything past
/// four lines scores as a tetris.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let base = match lines {
        0 => return 0,
        1 => SCORE_SINGLE,
        2 => SCORE_DOUBLE,
        3 => SCORE_TRIPLE,
        _ => SCORE_TETRIS,
    };
    base + level.saturating_sub(1) * lines * LEVEL_BONUS_PER_LINE
}

/// Garbage lines sent to the opponent for one lock
pub fn garbage_for_lines(lines: u32) -> u32 {
    GARBAGE_FOR_LINES
        .get(lines as usize)
        .copied()
        .unwrap_or(GARBAGE_FOR_LINES[4])
}

/// Level reached after `total_lines` cleared lines (levels start at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level
pub fn drop_interval_ms(level: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let interval = INITIAL_DROP_INTERVAL_MS as f64 * SPEED_FACTOR.powi(exponent);
    (interval as u32).max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table_at_level_one() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
    }

    #[test]
    fn test_level_bonus() {
        // (3 - 1) * 2 * 10 on top of the double
        assert_eq!(line_clear_score(2, 3), 340);
        assert_eq!(line_clear_score(4, 2), 840);
        assert_eq!(line_clear_score(0, 9), 0);
    }

    #[test]
    fn test_garbage_table() {
        assert_eq!(garbage_for_lines(0), 0);
        assert_eq!(garbage_for_lines(1), 0);
        assert_eq!(garbage_for_lines(2), 1);
        assert_eq!(garbage_for_lines(3), 2);
        assert_eq!(garbage_for_lines(4), 4);
    }

    #[test]
    fn test_levels() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
    }

    #[test]
    fn test_drop_interval_curve() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 800);
        assert_eq!(drop_interval_ms(3), 640);
        assert_eq!(drop_interval_ms(5), 409);
        assert_eq!(drop_interval_ms(11), 107);
        assert_eq!(drop_interval_ms(12), 100);
        assert_eq!(drop_interval_ms(40), 100);
    }
}
