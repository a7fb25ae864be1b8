//! Daily progress state machine.
//!
//! Turns a quiz completion into updated streak, coin and level state. The
//! engine never touches storage or the clock: callers load the record, derive
//! today's index with [`day_index_for`] and persist whatever [`ProgressEngine::apply`]
//! returns.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike};
use uuid::Uuid;

use crate::error::{ProgressError, Result};
use crate::types::{CompletionSummary, Level, ProgressRecord, QuizCompletion, DAYS_PER_WEEK};

/// Coin rewards for a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardRules {
    /// Efficiency at or above which the quiz counts as passed.
    pub pass_efficiency: u8,
    pub pass_coins: u32,
    pub base_coins: u32,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            pass_efficiency: 70,
            pass_coins: 10,
            base_coins: 5,
        }
    }
}

/// Result of applying a completion to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub record: ProgressRecord,
    pub summary: CompletionSummary,
}

/// Stateless progress engine; safe to share between requests.
#[derive(Debug, Clone, Default)]
pub struct ProgressEngine {
    pub rewards: RewardRules,
}

impl ProgressEngine {
    pub fn new(rewards: RewardRules) -> Self {
        Self { rewards }
    }

    /// Fresh record for a user with no progress yet.
    pub fn init_default(&self, user_id: Uuid) -> ProgressRecord {
        init_default(user_id)
    }

    /// Coins awarded for a quiz with the given efficiency.
    pub fn coins_for(&self, efficiency: u8) -> u32 {
        if efficiency >= self.rewards.pass_efficiency {
            self.rewards.pass_coins
        } else {
            self.rewards.base_coins
        }
    }

    /// Apply a quiz completion made on `today_index` (Monday = 0).
    ///
    /// The input record is left untouched; on error nothing is produced.
    /// Completing twice on the same day index only counts once toward the
    /// streak, though coins are awarded every time.
    pub fn apply(
        &self,
        record: &ProgressRecord,
        event: &QuizCompletion,
        today_index: u8,
    ) -> Result<ProgressUpdate> {
        let efficiency = validate_efficiency(event.efficiency)?;
        if today_index >= DAYS_PER_WEEK {
            return Err(ProgressError::out_of_range(
                "day index",
                i64::from(today_index),
                0,
                i64::from(DAYS_PER_WEEK - 1),
            ));
        }

        let coins_earned = self.coins_for(efficiency);
        let mut next = record.clone();

        if next.completed_days.insert(today_index) {
            next.streak = next.streak.saturating_add(1);
        }
        next.coins = next.coins.saturating_add(coins_earned);
        next.efficiency = efficiency;
        next.current_day = next.current_day.max(today_index);
        next.level = Level::from_completed_days(next.completed_count());

        let summary = CompletionSummary {
            coins_earned,
            new_level: next.level,
            total_coins: next.coins,
            streak: next.streak,
        };

        Ok(ProgressUpdate {
            record: next,
            summary,
        })
    }
}

/// Fresh record: no completed days, zero counters, `Beginner`.
pub fn init_default(user_id: Uuid) -> ProgressRecord {
    ProgressRecord {
        user_id,
        completed_days: Default::default(),
        streak: 0,
        coins: 0,
        current_day: 0,
        level: Level::Beginner,
        efficiency: 0,
    }
}

/// Monday-based weekday index (Monday = 0 .. Sunday = 6).
pub fn day_index_for<D: Datelike>(date: &D) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Weekday index of the study day containing `now`.
///
/// Hours before `reset_hour` still belong to the previous day, so a quiz
/// taken at 01:00 with a reset hour of 4 counts toward yesterday.
pub fn study_day_index<Tz: TimeZone>(now: &DateTime<Tz>, reset_hour: u32) -> u8 {
    if now.hour() < reset_hour {
        day_index_for(&(now.clone() - Duration::days(1)))
    } else {
        day_index_for(now)
    }
}

/// Share of the week completed, as a whole percentage.
pub fn progress_percent(record: &ProgressRecord) -> u8 {
    let ratio = record.completed_count() as f64 / f64::from(DAYS_PER_WEEK);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Rounded percentage of correct answers; zero when there were no questions.
pub fn efficiency_for(score: u32, total_questions: u32) -> u8 {
    if total_questions == 0 {
        return 0;
    }
    let ratio = f64::from(score) / f64::from(total_questions);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

fn validate_efficiency(value: i32) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| ProgressError::out_of_range("efficiency", i64::from(value), 0, 100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn engine() -> ProgressEngine {
        ProgressEngine::default()
    }

    fn fresh() -> ProgressRecord {
        init_default(Uuid::nil())
    }

    fn complete(record: &ProgressRecord, efficiency: i32, day: u8) -> ProgressUpdate {
        engine()
            .apply(record, &QuizCompletion::with_efficiency(efficiency), day)
            .unwrap()
    }

    #[test]
    fn default_record_is_empty_beginner() {
        let record = engine().init_default(Uuid::nil());
        assert!(record.completed_days.is_empty());
        assert_eq!(record.streak, 0);
        assert_eq!(record.coins, 0);
        assert_eq!(record.current_day, 0);
        assert_eq!(record.level, Level::Beginner);
        assert_eq!(record.efficiency, 0);
    }

    #[test]
    fn first_completion_on_monday() {
        let update = complete(&fresh(), 85, 0);
        assert_eq!(
            update.summary,
            CompletionSummary {
                coins_earned: 10,
                new_level: Level::Beginner,
                total_coins: 10,
                streak: 1,
            }
        );
        assert_eq!(update.record.completed_days.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(update.record.current_day, 0);
        assert_eq!(update.record.efficiency, 85);
    }

    #[test]
    fn same_day_repeat_keeps_streak() {
        let first = complete(&fresh(), 85, 0);
        let second = complete(&first.record, 40, 0);
        assert_eq!(second.summary.coins_earned, 5);
        assert_eq!(second.summary.total_coins, 15);
        assert_eq!(second.summary.streak, 1);
        assert_eq!(second.record.completed_count(), 1);
        assert_eq!(second.record.efficiency, 40);
    }

    #[test]
    fn repeated_day_never_inflates_streak() {
        let mut record = fresh();
        for efficiency in [0, 100, 69, 70, 33] {
            record = complete(&record, efficiency, 3).record;
        }
        assert_eq!(record.streak, 1);
    }

    #[test]
    fn full_week_reaches_intermediate() {
        let mut record = fresh();
        for day in 0..7 {
            record = complete(&record, 75, day).record;
        }
        assert_eq!(record.streak, 7);
        assert_eq!(record.level, Level::Intermediate);
        assert_eq!(record.coins, 70);
        assert_eq!(record.current_day, 6);
        assert_eq!(progress_percent(&record), 100);
    }

    #[test]
    fn streak_plateaus_after_every_slot_is_filled() {
        let mut record = fresh();
        for day in 0..7 {
            record = complete(&record, 75, day).record;
        }
        let update = complete(&record, 90, 2);
        assert_eq!(update.summary.streak, 7);
        assert_eq!(update.summary.total_coins, 80);
        assert_eq!(update.summary.new_level, Level::Intermediate);
    }

    #[test]
    fn coin_threshold_is_seventy() {
        let engine = engine();
        for efficiency in 0..=100u8 {
            let expected = if efficiency >= 70 { 10 } else { 5 };
            assert_eq!(engine.coins_for(efficiency), expected, "efficiency {efficiency}");
        }
    }

    #[test]
    fn efficiency_out_of_range_is_rejected() {
        let record = complete(&fresh(), 85, 0).record;
        let before = record.clone();

        for bad in [150, 101, -1, i32::MIN] {
            let err = engine()
                .apply(&record, &QuizCompletion::with_efficiency(bad), 0)
                .unwrap_err();
            assert!(matches!(err, ProgressError::InvalidInput { field: "efficiency", .. }));
        }
        assert_eq!(record, before);
    }

    #[test]
    fn day_index_out_of_range_is_rejected() {
        let record = fresh();
        for bad in [7, 8, u8::MAX] {
            let err = engine()
                .apply(&record, &QuizCompletion::with_efficiency(50), bad)
                .unwrap_err();
            assert!(matches!(err, ProgressError::InvalidInput { field: "day index", .. }));
        }
        assert_eq!(record, fresh());
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(engine().apply(&fresh(), &QuizCompletion::with_efficiency(0), 0).is_ok());
        assert!(engine().apply(&fresh(), &QuizCompletion::with_efficiency(100), 6).is_ok());
    }

    #[test]
    fn current_day_tracks_maximum_index() {
        let mut record = fresh();
        let days = [3, 1, 5, 0, 2];
        for day in days {
            record = complete(&record, 50, day).record;
        }
        assert_eq!(record.current_day, 5);
    }

    #[test]
    fn level_follows_completed_count() {
        let mut record = fresh();
        record.completed_days = (0..6).collect();
        let update = complete(&record, 50, 6);
        assert_eq!(update.record.level, Level::Intermediate);

        // Recomputed each call, so an externally shrunk set drops the level.
        let mut shrunk = update.record.clone();
        shrunk.completed_days = [0].into_iter().collect();
        let update = complete(&shrunk, 50, 0);
        assert_eq!(update.record.level, Level::Beginner);
    }

    #[test]
    fn custom_rewards() {
        let engine = ProgressEngine::new(RewardRules {
            pass_efficiency: 90,
            pass_coins: 25,
            base_coins: 1,
        });
        let update = engine
            .apply(&fresh(), &QuizCompletion::with_efficiency(89), 0)
            .unwrap();
        assert_eq!(update.summary.coins_earned, 1);
        assert_eq!(engine.coins_for(90), 25);
    }

    #[test]
    fn progress_percent_is_monotonic() {
        let mut record = fresh();
        let mut last = progress_percent(&record);
        assert_eq!(last, 0);
        for day in [4, 0, 6, 2, 1, 5, 3] {
            record = complete(&record, 50, day).record;
            let pct = progress_percent(&record);
            assert!(pct >= last);
            last = pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn progress_percent_rounds() {
        let mut record = fresh();
        record.completed_days = [0].into_iter().collect();
        assert_eq!(progress_percent(&record), 14);
        record.completed_days = (0..4).collect();
        assert_eq!(progress_percent(&record), 57);
    }

    #[test]
    fn day_index_is_monday_based() {
        // 2024-01-01 was a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for offset in 0..7 {
            let date = monday + Duration::days(offset);
            assert_eq!(day_index_for(&date), offset as u8);
        }
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 23, 59, 59).unwrap();
        assert_eq!(day_index_for(&sunday), 6);
    }

    #[test]
    fn study_day_honours_reset_hour() {
        let tz = FixedOffset::east_opt(0).unwrap();
        // Tuesday 02:30
        let early = tz.with_ymd_and_hms(2024, 1, 2, 2, 30, 0).unwrap();
        assert_eq!(study_day_index(&early, 0), 1);
        assert_eq!(study_day_index(&early, 4), 0);

        // Monday 01:00 rolls back to Sunday
        let monday = tz.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(study_day_index(&monday, 3), 6);
    }

    #[test]
    fn efficiency_from_score() {
        assert_eq!(efficiency_for(7, 10), 70);
        assert_eq!(efficiency_for(2, 3), 67);
        assert_eq!(efficiency_for(10, 10), 100);
        assert_eq!(efficiency_for(0, 0), 0);
    }
}
