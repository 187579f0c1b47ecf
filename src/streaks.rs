use crate::index::EntryIndex;
use chrono::{Duration, NaiveDate};

// Upper bound on the backward walk; keeps a date-arithmetic bug from turning
// into a non-terminating loop.
const MAX_BACKWARD_SCAN_DAYS: u32 = 366;

/// Consecutive present days ending at `as_of`, inclusive. An absent
/// reference day is a streak of 0; the walk never skips over gaps.
pub fn current_streak(index: &EntryIndex, habit_id: &str, as_of: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = as_of;
    while streak < MAX_BACKWARD_SCAN_DAYS && index.present(habit_id, day) {
        streak += 1;
        day = day - Duration::days(1);
    }
    streak
}

/// Longest run of consecutive present days within the window. The window is
/// expected in ascending order with no gaps.
pub fn longest_streak(index: &EntryIndex, habit_id: &str, window: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for &day in window {
        if index.present(habit_id, day) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Count of present days within the window.
pub fn total(index: &EntryIndex, habit_id: &str, window: &[NaiveDate]) -> u32 {
    window
        .iter()
        .filter(|&&day| index.present(habit_id, day))
        .count() as u32
}
