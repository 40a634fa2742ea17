//! Web layer: JSON API over the normalization core.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
