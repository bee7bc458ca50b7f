//! Level and streak arithmetic driven by quest completion.
//!
//! The xp curve is geometric: reaching level `n` requires a cumulative
//! total of `round(100 * 1.5^(n-1))` xp. Levels are never stored as a
//! derived column; they are re-resolved from the cumulative xp on every
//! completion, starting from the user's current level.

use crate::types::CalendarDate;

// ---------------------------------------------------------------------------
// Curve constants
// ---------------------------------------------------------------------------

/// Cumulative xp associated with level 1.
pub const BASE_LEVEL_XP: f64 = 100.0;

/// Growth factor applied per level.
pub const LEVEL_GROWTH: f64 = 1.5;

/// Lowest level a user can hold.
pub const MIN_LEVEL: i32 = 1;

/// Highest level the resolver will climb to.
///
/// Beyond this point the threshold no longer fits comfortably in an `i64`.
pub const MAX_LEVEL: i32 = 90;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Cumulative xp required to reach `level`.
///
/// Levels below [`MIN_LEVEL`] are treated as [`MIN_LEVEL`].
pub fn xp_threshold(level: i32) -> i64 {
    let exponent = level.max(MIN_LEVEL) - 1;
    (BASE_LEVEL_XP * LEVEL_GROWTH.powi(exponent)).round() as i64
}

/// Result of resolving a user's level against a new xp total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub level: i32,
    pub leveled_up: bool,
}

/// Climb from `current_level` while `total_xp` reaches the next threshold.
///
/// Each intermediate level is checked in turn, so a single large reward can
/// cross several thresholds at once.
pub fn resolve_level(current_level: i32, total_xp: i64) -> LevelOutcome {
    let start = current_level.max(MIN_LEVEL);
    let mut level = start;

    while level < MAX_LEVEL && total_xp >= xp_threshold(level + 1) {
        level += 1;
    }

    LevelOutcome {
        level,
        leveled_up: level > current_level,
    }
}

/// Xp still missing before the next level, floored at zero.
pub fn xp_to_next_level(level: i32, xp: i64) -> i64 {
    (xp_threshold(level + 1) - xp).max(0)
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// Compute the streak after a completion on `today`.
///
/// - No previous completion: the streak starts at 1.
/// - Previous completion yesterday: the streak grows by one.
/// - Gap of two or more days: the streak restarts at 1.
/// - Same day (or a last date in the future): the streak is left unchanged.
pub fn resolve_streak(
    last_quest_date: Option<CalendarDate>,
    today: CalendarDate,
    current_streak: i32,
) -> i32 {
    let Some(last) = last_quest_date else {
        return 1;
    };

    match (today - last).num_days() {
        1 => current_streak.saturating_add(1),
        gap if gap > 1 => 1,
        _ => current_streak,
    }
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

/// A user's progression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub level: i32,
    pub xp: i64,
    pub gold: i64,
    pub streak: i32,
    pub last_quest_date: Option<CalendarDate>,
}

/// Progression after a reward has been applied, plus whether a level was gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    pub progression: Progression,
    pub level_up: bool,
}

/// Apply a completed quest's rewards on `today`.
///
/// Xp and gold accumulate, the level is re-resolved from the new xp total,
/// the streak is advanced, and `today` becomes the last quest date.
pub fn apply_rewards(
    current: &Progression,
    xp_reward: i64,
    gold_reward: i64,
    today: CalendarDate,
) -> RewardOutcome {
    let xp = current.xp.saturating_add(xp_reward.max(0));
    let gold = current.gold.saturating_add(gold_reward.max(0));
    let LevelOutcome { level, leveled_up } = resolve_level(current.level, xp);
    let streak = resolve_streak(current.last_quest_date, today, current.streak);

    RewardOutcome {
        progression: Progression {
            level,
            xp,
            gold,
            streak,
            last_quest_date: Some(today),
        },
        level_up: leveled_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- xp_threshold --

    #[test]
    fn threshold_for_first_levels() {
        assert_eq!(xp_threshold(1), 100);
        assert_eq!(xp_threshold(2), 150);
        assert_eq!(xp_threshold(3), 225);
        // 337.5 rounds half away from zero.
        assert_eq!(xp_threshold(4), 338);
        assert_eq!(xp_threshold(5), 506);
    }

    #[test]
    fn threshold_strictly_increasing() {
        for level in MIN_LEVEL..MAX_LEVEL {
            assert!(
                xp_threshold(level + 1) > xp_threshold(level),
                "threshold must grow between {level} and {}",
                level + 1
            );
        }
    }

    #[test]
    fn threshold_clamps_levels_below_one() {
        assert_eq!(xp_threshold(0), 100);
        assert_eq!(xp_threshold(-5), 100);
    }

    // -- resolve_level --

    #[test]
    fn level_one_reaching_150_levels_up() {
        let outcome = resolve_level(1, 150);
        assert_eq!(outcome, LevelOutcome { level: 2, leveled_up: true });
    }

    #[test]
    fn level_unchanged_below_next_threshold() {
        let outcome = resolve_level(1, 149);
        assert_eq!(outcome, LevelOutcome { level: 1, leveled_up: false });
    }

    #[test]
    fn large_reward_crosses_several_levels() {
        // 150, 225, 338, 506, 759 are all <= 1000; 1139 is not.
        let outcome = resolve_level(1, 1000);
        assert_eq!(outcome.level, 6);
        assert!(outcome.leveled_up);
    }

    #[test]
    fn resolved_level_is_bracketed_by_thresholds() {
        for start in 1..6 {
            for xp in (0..5_000).step_by(37) {
                let outcome = resolve_level(start, xp);
                assert!(xp < xp_threshold(outcome.level + 1));
                assert!(outcome.level == start || xp >= xp_threshold(outcome.level));
            }
        }
    }

    #[test]
    fn level_never_exceeds_cap() {
        let outcome = resolve_level(1, i64::MAX);
        assert_eq!(outcome.level, MAX_LEVEL);
    }

    #[test]
    fn xp_to_next_level_floors_at_zero() {
        assert_eq!(xp_to_next_level(1, 0), 150);
        assert_eq!(xp_to_next_level(1, 100), 50);
        assert_eq!(xp_to_next_level(1, 500), 0);
    }

    // -- resolve_streak --

    #[test]
    fn first_completion_starts_streak() {
        assert_eq!(resolve_streak(None, date(2026, 3, 10), 0), 1);
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let today = date(2026, 3, 10);
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        assert_eq!(resolve_streak(Some(yesterday), today, 4), 5);
    }

    #[test]
    fn gap_resets_streak() {
        let today = date(2026, 3, 10);
        let three_days_ago = today.checked_sub_days(Days::new(3)).unwrap();
        assert_eq!(resolve_streak(Some(three_days_ago), today, 9), 1);
    }

    #[test]
    fn same_day_leaves_streak_unchanged() {
        let today = date(2026, 3, 10);
        assert_eq!(resolve_streak(Some(today), today, 3), 3);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        assert_eq!(resolve_streak(Some(date(2026, 2, 28)), date(2026, 3, 1), 2), 3);
    }

    #[test]
    fn future_last_date_leaves_streak_unchanged() {
        assert_eq!(resolve_streak(Some(date(2026, 3, 12)), date(2026, 3, 10), 7), 7);
    }

    // -- apply_rewards --

    fn fresh() -> Progression {
        Progression {
            level: 1,
            xp: 0,
            gold: 0,
            streak: 0,
            last_quest_date: None,
        }
    }

    #[test]
    fn first_reward_levels_and_starts_streak() {
        let today = date(2026, 3, 10);
        let outcome = apply_rewards(&fresh(), 150, 30, today);

        assert!(outcome.level_up);
        assert_eq!(
            outcome.progression,
            Progression {
                level: 2,
                xp: 150,
                gold: 30,
                streak: 1,
                last_quest_date: Some(today),
            }
        );
    }

    #[test]
    fn reward_next_day_extends_streak_without_level_up() {
        let current = Progression {
            level: 2,
            xp: 160,
            gold: 5,
            streak: 3,
            last_quest_date: Some(date(2026, 3, 9)),
        };
        let outcome = apply_rewards(&current, 10, 0, date(2026, 3, 10));

        assert!(!outcome.level_up);
        assert_eq!(outcome.progression.level, 2);
        assert_eq!(outcome.progression.xp, 170);
        assert_eq!(outcome.progression.gold, 5);
        assert_eq!(outcome.progression.streak, 4);
    }

    #[test]
    fn xp_never_decreases() {
        let current = Progression { xp: 500, ..fresh() };
        let outcome = apply_rewards(&current, -20, -5, date(2026, 3, 10));
        assert_eq!(outcome.progression.xp, 500);
        assert_eq!(outcome.progression.gold, 0);
    }
}
