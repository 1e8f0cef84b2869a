pub mod app;
pub mod client;
pub mod config;
pub mod content;
pub mod errors;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod state;
pub mod tracking;
pub mod ui;

pub use app::{router, serve};
pub use config::{ClientConfig, Config};
pub use state::AppState;
