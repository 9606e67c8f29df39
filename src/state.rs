use crate::store::BookingStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookingStore>,
}

impl AppState {
    pub fn new(store: impl BookingStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
