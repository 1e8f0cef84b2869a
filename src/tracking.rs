use crate::models::{BackendData, ContactMessage, ContactRequest, TrackRequest, TrackingEntry};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const RECENT_LIMIT: usize = 50;

impl BackendData {
    pub fn record_tracking(&mut self, request: TrackRequest, at: DateTime<Utc>) -> TrackingEntry {
        let entry = TrackingEntry {
            id: Uuid::new_v4().to_string(),
            name: request.name.unwrap_or_else(|| "Anonymous".to_string()),
            mood: request.mood.unwrap_or_default(),
            sleep_hours: request.sleep_hours,
            milestone: request.milestone.unwrap_or_default(),
            notes: request.notes.unwrap_or_default(),
            created_at: at,
        };
        self.tracking.push(entry.clone());
        entry
    }

    /// Newest first. A blank or missing name returns the most recent entries.
    pub fn list_tracking(&self, name: Option<&str>) -> Vec<TrackingEntry> {
        let newest_first = self.tracking.iter().rev();
        match name.filter(|name| !name.is_empty()) {
            Some(name) => newest_first.filter(|entry| entry.name == name).cloned().collect(),
            None => newest_first.take(RECENT_LIMIT).cloned().collect(),
        }
    }

    pub fn receive_contact(&mut self, request: ContactRequest, at: DateTime<Utc>) -> &ContactMessage {
        self.contacts.push(ContactMessage {
            name: request.name.unwrap_or_default(),
            email: request.email.unwrap_or_default(),
            message: request.message.unwrap_or_default(),
            received_at: at,
        });
        &self.contacts[self.contacts.len() - 1]
    }
}
