//! HTTP surface of the Mist guest portal.
//!
//! `router` builds the axum application over a shared [`Portal`]; the
//! `mistguest` binary adds configuration, logging, and the listener.

pub mod error;
mod handlers;
pub mod routes;

use mistguest_core::Portal;

pub use error::ApiError;
pub use routes::router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub portal: Portal,
}

impl AppState {
    pub fn new(portal: Portal) -> Self {
        Self { portal }
    }
}
