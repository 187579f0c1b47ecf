use crate::color::DEFAULT_BASE_COLOR;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub owner: Option<String>,
}

fn default_color() -> String {
    DEFAULT_BASE_COLOR.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub habit_id: String,
    pub date: NaiveDate,
    #[serde(default = "default_entry_value")]
    pub value: u32,
}

// Entries created by toggle carry no explicit value in older data files.
fn default_entry_value() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitListResponse {
    pub habits: Vec<Habit>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    pub group: Option<String>,
    pub color: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub habit_id: String,
    pub date: NaiveDate,
    pub value: u32,
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub end: Option<NaiveDate>,
    pub days: Option<usize>,
    pub group: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<GridRow>,
    pub day_totals: Vec<u32>,
    pub stats: Vec<HabitStatsRow>,
}

#[derive(Debug, Serialize)]
pub struct GridRow {
    pub habit_id: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub value: u32,
    pub streak: u32,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct HabitStatsRow {
    pub habit_id: String,
    pub name: String,
    pub color: String,
    pub current: u32,
    pub longest: u32,
    pub total: u32,
    pub week_rate: u8,
    pub month_rate: u8,
    pub year_rate: u8,
}

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub habit: Habit,
    pub weeks: Vec<Vec<HeatmapCell>>,
    pub stats: HabitStatsRow,
}

#[derive(Debug, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub value: u32,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_value_deserializes_to_one() {
        let entry: Entry =
            serde_json::from_str(r#"{"habit_id":"h1","date":"2024-01-05"}"#).unwrap();
        assert_eq!(entry.value, 1);
    }

    #[test]
    fn habit_without_color_gets_the_default() {
        let habit: Habit = serde_json::from_str(r#"{"id":"h1","name":"read"}"#).unwrap();
        assert_eq!(habit.color, DEFAULT_BASE_COLOR);
        assert_eq!(habit.order, 0);
        assert!(habit.group.is_none());
        assert!(habit.owner.is_none());
    }
}
