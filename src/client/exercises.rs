use super::Feature;
use super::store::{COMPLETED_KEY, EXERCISES_KEY, KeyValueBackend, LocalStore};
use crate::models::ExerciseDefinition;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub action_label: &'static str,
}

pub fn default_catalog() -> Vec<ExerciseDefinition> {
    [
        ("e1", "Breathing Exercise", "5-minute guided breathing to ease tension."),
        ("e2", "Gentle Stretch", "Simple postnatal stretches to restore movement."),
        ("e3", "Mini Meditation", "2-minute grounding meditation for calm."),
    ]
    .into_iter()
    .map(|(id, title, description)| ExerciseDefinition {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub struct Exercises<B> {
    store: LocalStore<B>,
}

impl<B: KeyValueBackend> Exercises<B> {
    pub fn new(store: LocalStore<B>) -> Self {
        Self { store }
    }

    pub fn completed(&self) -> Vec<String> {
        self.store.get(COMPLETED_KEY, Vec::new())
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed().iter().any(|done| done == id)
    }

    /// Completions only grow. Returns `false` when `id` was already done.
    pub fn mark_done(&self, id: &str) -> bool {
        let mut completed = self.completed();
        if completed.iter().any(|done| done == id) {
            return false;
        }
        completed.push(id.to_string());
        self.store.set(COMPLETED_KEY, &completed);
        info!(id, "exercise saved");
        true
    }
}

impl<B: KeyValueBackend> Feature for Exercises<B> {
    type Item = ExerciseDefinition;
    type View = Vec<ExerciseView>;

    const KEY: &'static str = EXERCISES_KEY;

    fn list(&self) -> Vec<ExerciseDefinition> {
        self.store.get(Self::KEY, default_catalog())
    }

    fn render(&self) -> Vec<ExerciseView> {
        let completed = self.completed();
        self.list()
            .into_iter()
            .map(|exercise| {
                let done = completed.contains(&exercise.id);
                ExerciseView {
                    completed: done,
                    action_label: if done { "Completed" } else { "Mark Complete" },
                    id: exercise.id,
                    title: exercise.title,
                    description: exercise.description,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_when_nothing_stored() {
        let exercises = Exercises::new(LocalStore::in_memory());
        let ids: Vec<_> = exercises.list().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn mark_done_is_idempotent() {
        let exercises = Exercises::new(LocalStore::in_memory());
        assert!(exercises.mark_done("e2"));
        assert!(!exercises.mark_done("e2"));
        assert_eq!(exercises.completed(), vec!["e2".to_string()]);
        assert!(exercises.is_completed("e2"));
        assert!(!exercises.is_completed("e1"));
    }

    #[test]
    fn render_reflects_completion() {
        let exercises = Exercises::new(LocalStore::in_memory());
        exercises.mark_done("e1");

        let view = exercises.render();
        assert_eq!(view.len(), 3);
        assert!(view[0].completed);
        assert_eq!(view[0].action_label, "Completed");
        assert_eq!(view[1].action_label, "Mark Complete");
    }

    #[test]
    fn stored_catalog_overrides_default() {
        let store = LocalStore::in_memory();
        store.set(
            EXERCISES_KEY,
            &vec![ExerciseDefinition {
                id: "x".to_string(),
                title: "Pelvic floor".to_string(),
                description: "Gentle squeezes.".to_string(),
            }],
        );
        let exercises = Exercises::new(store);
        assert_eq!(exercises.render()[0].title, "Pelvic floor");
    }
}
