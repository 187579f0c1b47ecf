use crate::color::{streak_color, value_color, EMPTY_CELL, WEEKEND_CELL};
use crate::index::EntryIndex;
use crate::models::{
    DashboardResponse, GridCell, GridRow, Habit, HabitStatsRow, HeatmapCell,
};
use crate::rates::completion_rate;
use crate::streaks::{current_streak, longest_streak, total};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Width of the visible grid slice.
pub const DEFAULT_GRID_DAYS: usize = 17;
pub const MAX_GRID_DAYS: usize = 366;
/// Streaks, totals and rates always look at this much trailing history,
/// independent of the visible slice.
pub const STATS_WINDOW_DAYS: usize = 365;

/// Ascending run of consecutive calendar days ending at `end`.
pub fn trailing_window(end: NaiveDate, len: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(len);
    for offset in (0..len).rev() {
        days.push(end - Duration::days(offset as i64));
    }
    days
}

/// Navigation is clamped to the stats horizon on one side and today on the
/// other rather than rejected.
pub fn clamp_window_end(requested: NaiveDate, today: NaiveDate) -> NaiveDate {
    let horizon = today - Duration::days(STATS_WINDOW_DAYS as i64);
    requested.clamp(horizon, today)
}

pub fn clamp_window_len(requested: usize) -> usize {
    requested.clamp(1, MAX_GRID_DAYS)
}

pub fn aggregate(
    days: &[NaiveDate],
    habits: &[Habit],
    index: &EntryIndex,
    today: NaiveDate,
) -> DashboardResponse {
    let history = trailing_window(today, STATS_WINDOW_DAYS);

    let mut rows = Vec::with_capacity(habits.len());
    let mut stats = Vec::with_capacity(habits.len());
    for habit in habits {
        let cells = days.iter().map(|&day| grid_cell(index, habit, day)).collect();
        rows.push(GridRow {
            habit_id: habit.id.clone(),
            cells,
        });
        stats.push(stats_row(index, habit, &history, today));
    }

    let day_totals = days
        .iter()
        .map(|&day| {
            habits
                .iter()
                .fold(0u32, |sum, habit| sum.saturating_add(index.value(&habit.id, day)))
        })
        .collect();

    DashboardResponse {
        days: days.to_vec(),
        rows,
        day_totals,
        stats,
    }
}

fn grid_cell(index: &EntryIndex, habit: &Habit, day: NaiveDate) -> GridCell {
    let value = index.value(&habit.id, day);
    let (streak, color) = if value >= 1 {
        // The shade encodes the run ending at this very cell, so the streak
        // is recomputed per day rather than carried across the row.
        let streak = current_streak(index, &habit.id, day);
        (streak, streak_color(streak, &habit.color))
    } else if is_weekend(day) {
        (0, WEEKEND_CELL.to_string())
    } else {
        (0, EMPTY_CELL.to_string())
    };

    GridCell {
        date: day,
        value,
        streak,
        color,
    }
}

pub fn stats_row(
    index: &EntryIndex,
    habit: &Habit,
    history: &[NaiveDate],
    today: NaiveDate,
) -> HabitStatsRow {
    HabitStatsRow {
        habit_id: habit.id.clone(),
        name: habit.name.clone(),
        color: habit.color.clone(),
        current: current_streak(index, &habit.id, today),
        longest: longest_streak(index, &habit.id, history),
        total: total(index, &habit.id, history),
        week_rate: completion_rate(index, &habit.id, 7, today),
        month_rate: completion_rate(index, &habit.id, 30, today),
        year_rate: completion_rate(index, &habit.id, 365, today),
    }
}

/// Trailing-year day grid for the detail surface, grouped into Monday-aligned
/// weeks and shaded by raw value.
pub fn heatmap_weeks(habit: &Habit, index: &EntryIndex, today: NaiveDate) -> Vec<Vec<HeatmapCell>> {
    let start = week_start(today - Duration::days(STATS_WINDOW_DAYS as i64 - 1));
    let end = week_start(today) + Duration::days(6);

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut day = start;
    while day <= end {
        let value = index.value(&habit.id, day);
        week.push(HeatmapCell {
            date: day,
            value,
            color: value_color(value, &habit.color),
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        day = day + Duration::days(1);
    }
    weeks
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    fn day(date: &str) -> NaiveDate {
        date.parse().unwrap()
    }

    fn habit(id: &str, color: &str) -> Habit {
        Habit {
            id: id.to_string(),
            name: id.to_string(),
            group: None,
            color: color.to_string(),
            order: 0,
            owner: None,
        }
    }

    fn entry(habit_id: &str, date: &str, value: u32) -> Entry {
        Entry {
            habit_id: habit_id.to_string(),
            date: date.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn trailing_window_is_ascending_and_gapless() {
        let days = trailing_window(day("2024-01-05"), 3);
        assert_eq!(
            days,
            vec![day("2024-01-03"), day("2024-01-04"), day("2024-01-05")]
        );
        assert_eq!(trailing_window(day("2024-01-05"), 1), vec![day("2024-01-05")]);
    }

    #[test]
    fn window_end_clamps_to_horizon_and_today() {
        let today = day("2024-06-01");
        assert_eq!(clamp_window_end(day("2024-07-09"), today), today);
        assert_eq!(
            clamp_window_end(day("2020-01-01"), today),
            today - Duration::days(365)
        );
        assert_eq!(clamp_window_end(day("2024-05-20"), today), day("2024-05-20"));
    }

    #[test]
    fn window_length_clamps_to_valid_sizes() {
        assert_eq!(clamp_window_len(0), 1);
        assert_eq!(clamp_window_len(17), 17);
        assert_eq!(clamp_window_len(10_000), MAX_GRID_DAYS);
    }

    #[test]
    fn cells_carry_value_streak_and_shade() {
        // 2024-01-04 is a Thursday; the run 01-04..01-05 grows cell by cell.
        let index = EntryIndex::build(&[
            entry("h1", "2024-01-04", 1),
            entry("h1", "2024-01-05", 1),
        ]);
        let habits = [habit("h1", "#22c55e")];
        let days = trailing_window(day("2024-01-06"), 3);
        let out = aggregate(&days, &habits, &index, day("2024-01-06"));

        let cells = &out.rows[0].cells;
        assert_eq!(cells[0].streak, 1);
        assert_eq!(cells[0].color, "hsl(142, 70.6%, 88.0%)");
        assert_eq!(cells[1].streak, 2);
        assert_eq!(cells[2].value, 0);
        assert_eq!(cells[2].streak, 0);
    }

    #[test]
    fn empty_weekend_cells_get_their_own_background() {
        // 2024-01-05 Fri, 01-06 Sat, 01-07 Sun; nothing marked.
        let index = EntryIndex::build(&[]);
        let habits = [habit("h1", "#22c55e")];
        let days = trailing_window(day("2024-01-07"), 3);
        let out = aggregate(&days, &habits, &index, day("2024-01-07"));

        let cells = &out.rows[0].cells;
        assert_eq!(cells[0].color, EMPTY_CELL);
        assert_eq!(cells[1].color, WEEKEND_CELL);
        assert_eq!(cells[2].color, WEEKEND_CELL);
    }

    #[test]
    fn day_totals_sum_values_across_habits() {
        let index = EntryIndex::build(&[
            entry("h1", "2024-01-05", 2),
            entry("h2", "2024-01-05", 3),
            entry("h2", "2024-01-04", 1),
        ]);
        let habits = [habit("h1", "#22c55e"), habit("h2", "#3b82f6")];
        let days = trailing_window(day("2024-01-05"), 2);
        let out = aggregate(&days, &habits, &index, day("2024-01-05"));
        assert_eq!(out.day_totals, vec![1, 5]);
    }

    #[test]
    fn stats_look_past_the_visible_slice() {
        // The grid shows three days, none marked; the stats still see the
        // September run.
        let index = EntryIndex::build(&[
            entry("h1", "2024-09-01", 1),
            entry("h1", "2024-09-02", 1),
            entry("h1", "2024-09-03", 1),
        ]);
        let habits = [habit("h1", "#22c55e")];
        let days = trailing_window(day("2024-12-31"), 3);
        let out = aggregate(&days, &habits, &index, day("2024-12-31"));

        assert!(out.rows[0].cells.iter().all(|cell| cell.value == 0));
        let stats = &out.stats[0];
        assert_eq!(stats.current, 0);
        assert_eq!(stats.longest, 3);
        assert_eq!(stats.total, 3);
    }

    #[test]
    fn heatmap_weeks_are_monday_aligned_and_full() {
        let index = EntryIndex::build(&[entry("h1", "2024-06-01", 2)]);
        let h = habit("h1", "#22c55e");
        let weeks = heatmap_weeks(&h, &index, day("2024-06-05"));

        assert!(weeks.len() >= 52);
        for week in &weeks {
            assert_eq!(week.len(), 7);
        }
        assert_eq!(weeks[0][0].date.weekday(), Weekday::Mon);

        let marked = weeks
            .iter()
            .flatten()
            .find(|cell| cell.date == day("2024-06-01"))
            .unwrap();
        assert_eq!(marked.value, 2);
        assert_eq!(marked.color, "rgba(34, 197, 94, 0.7)");
    }

    #[test]
    fn heatmap_covers_the_trailing_year_through_today() {
        let index = EntryIndex::build(&[]);
        let h = habit("h1", "#22c55e");
        let today = day("2024-06-05");
        let weeks = heatmap_weeks(&h, &index, today);

        let first = weeks[0][0].date;
        let last = weeks.last().unwrap().last().unwrap().date;
        assert!(first <= today - Duration::days(STATS_WINDOW_DAYS as i64 - 1));
        assert!(last >= today);
    }
}
