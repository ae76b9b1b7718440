//! Route definitions for the link store API
//!
//! This module configures all HTTP routes and maps them to their
//! respective handlers. It creates the Axum router with the application
//! state.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handler::{
    create_link, create_user, delete_link, get_link, list_links, list_users, update_link,
};
use crate::store::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET    /api/v1/links` - Lists all links
/// - `GET    /api/v1/links/{short_code}` - Fetches one link
/// - `POST   /api/v1/links` - Creates a new link
/// - `PUT    /api/v1/links/{short_code}` - Updates a link's destination
/// - `DELETE /api/v1/links/{short_code}` - Deletes a link and its stats
/// - `GET    /api/v1/users` - Lists all users
/// - `POST   /api/v1/users` - Registers a new user
///
/// # Arguments
///
/// * `state` - Application state holding the shared record store
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/links", get(list_links).post(create_link))
        .route(
            "/links/{short_code}",
            get(get_link).put(update_link).delete(delete_link),
        )
        .route("/users", get(list_users).post(create_user));

    Router::new()
        // All endpoints live under the versioned API prefix
        .nest("/api/v1", api)
        .layer(CorsLayer::permissive())
        // Inject the application state into all handlers
        .with_state(state)
}
