use crate::models::Entry;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Read-only lookup of per-day completion values, keyed by habit and
/// calendar day. Built once per store revision and shared by every
/// computation over the same snapshot.
#[derive(Debug, Default)]
pub struct EntryIndex {
    values: HashMap<String, HashMap<NaiveDate, u32>>,
    earliest: HashMap<String, NaiveDate>,
}

impl EntryIndex {
    pub fn build(entries: &[Entry]) -> Self {
        let mut values: HashMap<String, HashMap<NaiveDate, u32>> = HashMap::new();
        for entry in entries {
            // Later duplicates win, so a trailing zero-valued record masks
            // any earlier value for that day.
            values
                .entry(entry.habit_id.clone())
                .or_default()
                .insert(entry.date, entry.value);
        }

        let mut earliest = HashMap::new();
        for (habit_id, days) in &values {
            let first = days
                .iter()
                .filter(|(_, value)| **value >= 1)
                .map(|(date, _)| *date)
                .min();
            if let Some(first) = first {
                earliest.insert(habit_id.clone(), first);
            }
        }

        Self { values, earliest }
    }

    pub fn get(&self, habit_id: &str, date: NaiveDate) -> Option<u32> {
        self.values
            .get(habit_id)
            .and_then(|days| days.get(&date))
            .copied()
    }

    pub fn value(&self, habit_id: &str, date: NaiveDate) -> u32 {
        self.get(habit_id, date).unwrap_or(0)
    }

    /// A day counts as present only with a value of at least 1; zero-valued
    /// records are absent days.
    pub fn present(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.value(habit_id, date) >= 1
    }

    /// Earliest present day for the habit, the anchor for completion rates.
    pub fn earliest(&self, habit_id: &str) -> Option<NaiveDate> {
        self.earliest.get(habit_id).copied()
    }
}
