//! In-memory record store with write-through JSON persistence
//!
//! The store owns the three collections (links, users, stats) for the
//! process lifetime and mediates every read and write. It enforces:
//!
//! - unique short codes across links
//! - unique emails across users
//! - referential integrity between stats rows and links (deleting a link
//!   deletes its stats rows in the same operation)
//! - memory/disk equality: after any operation the in-memory collections
//!   match what the persistence layer would load back, whether the
//!   operation succeeded or failed
//!
//! Each mutating operation is a single atomic step. It validates against
//! the current in-memory state, applies the mutation, and synchronously
//! writes the affected collection(s) back to disk before returning. When a
//! write fails the in-memory mutation is rolled back and the error is
//! returned, so state observed by later calls never diverges from disk.
//!
//! Uniqueness checks and lookups are linear scans over the collections,
//! which is fine at the intended scale.

use std::sync::Arc;

use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{Result, StoreError};
use crate::model::{Link, Stats, User};
use crate::storage::Storage;

/// Length of the random suffix in generated record ids
const ID_SUFFIX_LEN: usize = 10;

/// Application state shared across all request handlers
///
/// The store is not internally synchronized, so all access goes through
/// one mutex. Mutations are infrequent and the files are small; a single
/// lock is enough to keep the invariants under concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// The record store: three in-memory collections plus their storage
#[derive(Debug)]
pub struct Store {
    storage: Storage,
    links: Vec<Link>,
    users: Vec<User>,
    stats: Vec<Stats>,
}

impl Store {
    /// Loads all three collections from storage and returns a ready store
    ///
    /// Fails with the persistence layer's error if any collection fails to
    /// load. A corrupt collection file is fatal here; the store does not
    /// attempt repair or partial startup.
    pub fn initialize(storage: Storage) -> Result<Self> {
        let links = storage.load_links()?;
        let users = storage.load_users()?;
        let stats = storage.load_stats()?;

        Ok(Self {
            storage,
            links,
            users,
            stats,
        })
    }

    /// Registers a new short link
    ///
    /// Fails with `DuplicateShortCode` if the code is already taken
    /// (case-sensitive exact match) and with `InvalidUrl` if the URL has
    /// no scheme or no host. On success the link is appended and the link
    /// collection is persisted; a failed write rolls the append back.
    pub fn add_link(
        &mut self,
        original_url: &str,
        short_code: &str,
        owner_user_id: &str,
    ) -> Result<Link> {
        if self.links.iter().any(|l| l.short_code == short_code) {
            return Err(StoreError::DuplicateShortCode(short_code.to_string()));
        }
        if !is_valid_url(original_url) {
            return Err(StoreError::InvalidUrl(original_url.to_string()));
        }

        let link = Link {
            id: fresh_id("link", |id| self.links.iter().any(|l| l.id == id)),
            original_url: original_url.to_string(),
            short_code: short_code.to_string(),
            owner_user_id: owner_user_id.to_string(),
            created_at: Utc::now(),
        };

        self.links.push(link.clone());
        if let Err(err) = self.storage.save_links(&self.links) {
            self.links.pop();
            return Err(err);
        }

        Ok(link)
    }

    /// Replaces the destination URL of an existing link
    ///
    /// Only `original_url` changes; id, short code, owner and creation
    /// time stay as they are. Fails with `LinkNotFound` if no link has the
    /// given code.
    pub fn update_link(&mut self, short_code: &str, new_original_url: &str) -> Result<Link> {
        if !is_valid_url(new_original_url) {
            return Err(StoreError::InvalidUrl(new_original_url.to_string()));
        }

        let link = self
            .links
            .iter_mut()
            .find(|l| l.short_code == short_code)
            .ok_or_else(|| StoreError::LinkNotFound(short_code.to_string()))?;

        let previous_url = std::mem::replace(&mut link.original_url, new_original_url.to_string());
        let updated = link.clone();

        if let Err(err) = self.storage.save_links(&self.links) {
            if let Some(link) = self.links.iter_mut().find(|l| l.short_code == short_code) {
                link.original_url = previous_url;
            }
            return Err(err);
        }

        Ok(updated)
    }

    /// Removes a link and every stats row that references it
    ///
    /// The two removals form one all-or-nothing operation: stats are
    /// persisted first, then links, and a failure of either write rolls
    /// both collections back in memory and restores the stats file.
    pub fn delete_link(&mut self, short_code: &str) -> Result<()> {
        let position = self
            .links
            .iter()
            .position(|l| l.short_code == short_code)
            .ok_or_else(|| StoreError::LinkNotFound(short_code.to_string()))?;

        let link = self.links.remove(position);
        let stats_before = self.stats.clone();
        self.stats.retain(|s| s.link_id != link.id);

        if let Err(err) = self.storage.save_stats(&self.stats) {
            self.stats = stats_before;
            self.links.insert(position, link);
            return Err(err);
        }

        if let Err(err) = self.storage.save_links(&self.links) {
            self.stats = stats_before;
            self.links.insert(position, link);
            // The stats file already holds the swept snapshot; put the
            // pre-delete rows back so disk matches memory again.
            if let Err(restore_err) = self.storage.save_stats(&self.stats) {
                warn!(error = %restore_err, "failed to restore stats file after aborted delete");
            }
            return Err(err);
        }

        Ok(())
    }

    /// Registers a new user
    ///
    /// Fails with `DuplicateEmail` if a user with the same email already
    /// exists (case-sensitive exact match).
    pub fn add_user(&mut self, name: &str, email: &str) -> Result<User> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: fresh_id("user", |id| self.users.iter().any(|u| u.id == id)),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };

        self.users.push(user.clone());
        if let Err(err) = self.storage.save_users(&self.users) {
            self.users.pop();
            return Err(err);
        }

        Ok(user)
    }

    /// All links in insertion order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All users in insertion order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All stats rows in insertion order
    pub fn stats(&self) -> &[Stats] {
        &self.stats
    }

    /// Looks up a link by its short code
    pub fn link_by_short_code(&self, short_code: &str) -> Result<&Link> {
        self.links
            .iter()
            .find(|l| l.short_code == short_code)
            .ok_or_else(|| StoreError::LinkNotFound(short_code.to_string()))
    }

    /// Looks up a user by email
    pub fn user_by_email(&self, email: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))
    }
}

/// Generates a prefixed id with a random alphanumeric suffix
///
/// Re-rolls until the id passes the collision check, so generated ids
/// never clash with ids already in the collection.
fn fresh_id(prefix: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    loop {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        let id = format!("{}_{}", prefix, suffix);
        if !taken(&id) {
            return id;
        }
    }
}

/// Checks that a URL string carries a non-empty scheme and host
///
/// Anything after the authority (path, query, fragment) is irrelevant to
/// the check, so "https://example.com/a?b#c" and "https://example.com"
/// both pass while "not-a-url" and "https://" both fail.
fn is_valid_url(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !scheme.is_empty() && !host.is_empty()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_url;

    #[test]
    fn accepts_urls_with_scheme_and_host() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?query#fragment"));
        assert!(is_valid_url("ftp://files.example.com/pub"));
    }

    #[test]
    fn rejects_urls_missing_scheme_or_host() {
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("example.com/no-scheme"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("://example.com"));
        assert!(!is_valid_url(""));
    }
}
