use crate::color::DEFAULT_BASE_COLOR;
use crate::index::EntryIndex;
use crate::models::{Entry, Habit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Persisted document plus an in-memory index cache. The cache never hits
/// disk; `revision` tracks entry mutations so reads after a write rebuild.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Store {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(skip)]
    revision: u64,
    #[serde(skip)]
    cache: Option<CachedIndex>,
}

#[derive(Debug, Clone)]
struct CachedIndex {
    revision: u64,
    index: Arc<EntryIndex>,
}

impl Store {
    /// Index over the current entries, rebuilt only after an entry mutation.
    pub fn index(&mut self) -> Arc<EntryIndex> {
        if let Some(cached) = &self.cache {
            if cached.revision == self.revision {
                return Arc::clone(&cached.index);
            }
        }
        let index = Arc::new(EntryIndex::build(&self.entries));
        self.cache = Some(CachedIndex {
            revision: self.revision,
            index: Arc::clone(&index),
        });
        index
    }

    fn touch_entries(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Habits in display order. The sort is stable, so habits sharing an
    /// order value keep their creation order.
    pub fn sorted_habits(&self) -> Vec<Habit> {
        let mut habits = self.habits.clone();
        habits.sort_by_key(|habit| habit.order);
        habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    fn next_order(&self) -> i64 {
        self.habits.iter().map(|habit| habit.order).max().unwrap_or(0) + 1
    }

    pub fn create_habit(&mut self, name: String, group: Option<String>) -> Habit {
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name,
            group,
            color: DEFAULT_BASE_COLOR.to_string(),
            order: self.next_order(),
            owner: None,
        };
        self.habits.push(habit.clone());
        habit
    }

    /// Removes the habit and every entry pointing at it. Returns false when
    /// the id is unknown.
    pub fn remove_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        if self.habits.len() == before {
            return false;
        }
        let entries_before = self.entries.len();
        self.entries.retain(|entry| entry.habit_id != id);
        if self.entries.len() != entries_before {
            self.touch_entries();
        }
        true
    }

    /// Flips the day for a habit and returns the value now in effect:
    /// 1 after marking, 0 after clearing.
    pub fn toggle_entry(&mut self, habit_id: &str, date: NaiveDate) -> u32 {
        let present = self
            .entries
            .iter()
            .rev()
            .find(|entry| entry.habit_id == habit_id && entry.date == date)
            .map(|entry| entry.value >= 1)
            .unwrap_or(false);

        self.entries
            .retain(|entry| !(entry.habit_id == habit_id && entry.date == date));
        let value = if present {
            0
        } else {
            self.entries.push(Entry {
                habit_id: habit_id.to_string(),
                date,
                value: 1,
            });
            1
        };
        self.touch_entries();
        value
    }

    pub fn entries_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.date >= from && entry.date <= to)
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: Store) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(store)),
        }
    }
}
