//! Data models for the link store service
//!
//! This module defines all the data structures used throughout the
//! application: the three persisted record types (links, users, stats)
//! and the HTTP request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner recorded on links created without an explicit `owner_user_id`.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// A shortened link record
///
/// Only `original_url` may change after creation; `id`, `short_code`,
/// `owner_user_id` and `created_at` are immutable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Link {
    /// Opaque unique identifier, assigned at creation (e.g. "link_x7Kp2mQ9aW")
    pub id: String,

    /// The original long URL this link redirects to
    pub original_url: String,

    /// Caller-chosen slug, unique across all links (e.g. "my-link")
    pub short_code: String,

    /// Identifier of the owning user
    ///
    /// Defaults to "anonymous" when not supplied. Not validated against
    /// the user collection; ownership is informational at write time.
    pub owner_user_id: String,

    /// Timestamp when this link was created
    pub created_at: DateTime<Utc>,
}

/// A registered user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    /// Opaque unique identifier, assigned at creation (e.g. "user_b3Nf8tRq1Z")
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Timestamp when this user was created
    pub created_at: DateTime<Utc>,
}

/// Usage statistics for a link
///
/// Rows are loaded from disk and carried through save cycles; no operation
/// in the store creates or increments them. A row never outlives its link:
/// deleting a link deletes its stats rows in the same operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Stats {
    /// `id` of the link these counters belong to
    pub link_id: String,

    /// Number of times the short link has been visited
    /// Defaults to 0 if not present during deserialization
    #[serde(default)]
    pub clicks: u64,

    /// Last time the short link was visited, if ever
    #[serde(default)]
    pub last_visited_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new link
///
/// # Example
/// ```json
/// {
///   "original_url": "https://example.com/very/long/url",
///   "short_code": "my-link",
///   "owner_user_id": "user_123"  // Optional
/// }
/// ```
#[derive(Deserialize)]
pub struct CreateLinkRequest {
    /// The URL to shorten; must carry a scheme and a host
    pub original_url: String,

    /// The slug to register; must not collide with an existing link
    pub short_code: String,

    /// Optional owner identifier
    /// If absent or empty, the link is recorded as anonymous
    pub owner_user_id: Option<String>,
}

/// Request payload for updating a link's destination
#[derive(Deserialize)]
pub struct UpdateLinkRequest {
    /// The new destination URL
    pub original_url: String,
}

/// Request payload for registering a user
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}
