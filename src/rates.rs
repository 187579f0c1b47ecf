use crate::index::EntryIndex;
use chrono::{Duration, NaiveDate};

/// Completion percentage over a trailing window ending today, as an integer
/// 0..=100. The denominator is capped at the number of days the habit has
/// existed (earliest present entry through today) so a young habit is not
/// graded on days before its first record; a habit with no entries counts a
/// single empty day. Rounding is half-up.
pub fn completion_rate(
    index: &EntryIndex,
    habit_id: &str,
    window_days: u32,
    today: NaiveDate,
) -> u8 {
    let earliest = index.earliest(habit_id).unwrap_or(today);
    let tracked_days = (today - earliest).num_days() + 1;
    let available = i64::from(window_days).min(tracked_days).max(1);

    let mut present = 0;
    for offset in 0..available {
        if index.present(habit_id, today - Duration::days(offset)) {
            present += 1;
        }
    }

    (present as f64 / available as f64 * 100.0).round() as u8
}
