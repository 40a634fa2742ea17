//! Application state for the web layer.

use std::sync::Arc;

use crate::giromilano::GiromilanoClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream GiroMilano client
    pub giromilano: Arc<GiromilanoClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(giromilano: GiromilanoClient) -> Self {
        Self {
            giromilano: Arc::new(giromilano),
        }
    }
}
