use crate::models::BackendData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handler state. The store lives for the process and is never persisted.
#[derive(Clone, Default)]
pub struct AppState {
    pub data: Arc<Mutex<BackendData>>,
}

impl AppState {
    pub fn new(data: BackendData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}
