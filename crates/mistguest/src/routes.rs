use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::{clients, connection, guests, import, sites};

/// The full application: JSON API under `/api` plus `/health`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/test-connection", post(connection::test_connection))
        .route("/api/sites", get(sites::list_sites))
        .route("/api/sites/{site_id}/wlans", get(sites::list_wlans))
        .route(
            "/api/sites/{site_id}/wlans/{wlan_id}/guests",
            get(guests::list_guests).post(guests::authorize_guest),
        )
        .route(
            "/api/sites/{site_id}/wlans/{wlan_id}/guests/{mac}",
            put(guests::update_guest).delete(guests::deauthorize_guest),
        )
        .route(
            "/api/sites/{site_id}/clients/search",
            get(clients::search_clients),
        )
        .route("/api/sites-wlans-map", get(sites::sites_wlans_map))
        .route("/api/bulk-import", post(import::bulk_import))
        .route("/api/csv-template", get(import::csv_template))
        .route("/health", get(connection::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
