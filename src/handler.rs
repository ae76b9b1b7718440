//! HTTP request handlers for the link store API
//!
//! Handlers do request-shape validation (required fields, the anonymous
//! owner default) and delegate everything else to the record store. All
//! business rules live in the store; a handler never touches the
//! collections directly.
//!
//! Every handler takes the store mutex for the duration of the call, so
//! mutating operations are serialized and the store's invariants hold
//! under concurrent requests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::{Result, StoreError};
use crate::model::{
    CreateLinkRequest, CreateUserRequest, UpdateLinkRequest, ANONYMOUS_OWNER,
};
use crate::store::AppState;

/// Lists all links
///
/// # Response
///
/// - **200 OK** - JSON array of links in insertion order
pub async fn list_links(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(store.links().to_vec())
}

/// Fetches a single link by its short code
///
/// # Response
///
/// - **200 OK** - the link
/// - **404 Not Found** - no link with this short code
pub async fn get_link(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let store = state.store.lock().await;
    let link = store.link_by_short_code(&short_code)?;
    Ok(Json(link.clone()))
}

/// Creates a new short link
///
/// Requires `original_url` and `short_code`; an absent or empty
/// `owner_user_id` records the link as anonymous.
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/very/long/url",
///   "short_code": "my-link",
///   "owner_user_id": "user_123"  // Optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the created link
/// - **400 Bad Request** - missing field or malformed URL
/// - **409 Conflict** - short code already taken
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse> {
    if payload.original_url.is_empty() {
        return Err(StoreError::MissingField("original_url"));
    }
    if payload.short_code.is_empty() {
        return Err(StoreError::MissingField("short_code"));
    }

    let owner = match payload.owner_user_id.as_deref() {
        Some(owner) if !owner.is_empty() => owner,
        _ => ANONYMOUS_OWNER,
    };

    let mut store = state.store.lock().await;
    let link = store.add_link(&payload.original_url, &payload.short_code, owner)?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Updates the destination URL of an existing link
///
/// # Response
///
/// - **200 OK** - the updated link
/// - **400 Bad Request** - missing or malformed URL
/// - **404 Not Found** - no link with this short code
pub async fn update_link(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<impl IntoResponse> {
    if payload.original_url.is_empty() {
        return Err(StoreError::MissingField("original_url"));
    }

    let mut store = state.store.lock().await;
    let link = store.update_link(&short_code, &payload.original_url)?;

    Ok(Json(link))
}

/// Deletes a link and its usage statistics
///
/// # Response
///
/// - **204 No Content** - link and its stats rows removed
/// - **404 Not Found** - no link with this short code
pub async fn delete_link(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let mut store = state.store.lock().await;
    store.delete_link(&short_code)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(store.users().to_vec())
}

/// Registers a new user
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the created user
/// - **400 Bad Request** - missing field
/// - **409 Conflict** - email already registered
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    if payload.name.is_empty() {
        return Err(StoreError::MissingField("name"));
    }
    if payload.email.is_empty() {
        return Err(StoreError::MissingField("email"));
    }

    let mut store = state.store.lock().await;
    let user = store.add_user(&payload.name, &payload.email)?;

    Ok((StatusCode::CREATED, Json(user)))
}
