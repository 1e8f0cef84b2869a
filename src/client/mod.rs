//! Client-side site features backed by a [`store::LocalStore`].

pub mod assistant;
pub mod exercises;
pub mod forms;
pub mod shop;
pub mod site;
pub mod store;
pub mod tracker;

pub use assistant::{AssistantTransport, AssistantWidget, ChatTurn, HttpAssistant, ReplySource};
pub use exercises::Exercises;
pub use forms::{FormSpec, Forms};
pub use shop::{Cart, CatalogSource, HttpCatalog, Shop, Wishlist};
pub use site::Site;
pub use store::{FileBackend, KeyValueBackend, LocalStore, MemoryBackend};
pub use tracker::{Tracker, TrackingDraft};

/// A feature that owns one persisted collection and projects it into a view.
///
/// Views are rebuilt from scratch on every call.
pub trait Feature {
    type Item;
    type View;

    const KEY: &'static str;

    fn list(&self) -> Vec<Self::Item>;
    fn render(&self) -> Self::View;
}
