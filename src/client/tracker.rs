use super::Feature;
use super::store::{KeyValueBackend, LocalStore, TRACKING_KEY};
use crate::models::TrackingEntry;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

pub const DISPLAY_LIMIT: usize = 50;

/// Form values for a new entry; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct TrackingDraft {
    pub name: Option<String>,
    pub mood: Option<String>,
    pub sleep_hours: Option<f64>,
    pub milestone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingRow {
    pub when: String,
    pub summary: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Dashboard {
    Empty { message: &'static str },
    Entries { rows: Vec<TrackingRow> },
}

pub struct Tracker<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Tracker<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    pub fn save(&self, draft: TrackingDraft) -> TrackingEntry {
        let entry = TrackingEntry {
            id: Uuid::new_v4().to_string(),
            name: draft.name.unwrap_or_else(|| "Anonymous".to_string()),
            mood: draft.mood.unwrap_or_default(),
            sleep_hours: draft.sleep_hours.filter(|hours| hours.is_finite()),
            milestone: draft.milestone.unwrap_or_default(),
            notes: draft.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let mut entries = self.list();
        entries.insert(0, entry.clone());
        self.store.set(Self::KEY, &entries);
        info!(id = %entry.id, "tracking entry saved");
        entry
    }
}

impl<B: KeyValueBackend> Feature for Tracker<B> {
    type Item = TrackingEntry;
    type View = Dashboard;

    const KEY: &'static str = TRACKING_KEY;

    /// Newest first.
    fn list(&self) -> Vec<TrackingEntry> {
        self.store.get(Self::KEY, Vec::new())
    }

    fn render(&self) -> Dashboard {
        let entries = self.list();
        if entries.is_empty() {
            return Dashboard::Empty {
                message: "No entries yet.",
            };
        }

        let rows = entries
            .iter()
            .take(DISPLAY_LIMIT)
            .map(|entry| TrackingRow {
                when: entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
                summary: format!(
                    "Mood: {} · Sleep: {} · Baby: {}",
                    entry.mood,
                    entry
                        .sleep_hours
                        .map(|hours| format!("{hours}h"))
                        .unwrap_or_else(|| "-".to_string()),
                    entry.milestone
                ),
                notes: entry.notes.clone(),
            })
            .collect();

        Dashboard::Entries { rows }
    }
}
