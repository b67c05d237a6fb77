//! Snapshot Module
//!
//! The complete persisted state, read and written as one unit.
//!
//! ## File Format
//! ```text
//! {
//!   "posts":          { "id_count": 3, "items": { "1": {..}, "2": {..} } },
//!   "users":          { "id_count": 2, "items": { "1": {..} } },
//!   "refresh_tokens": { "<64 hex chars>": {..} }
//! }
//! ```
//!
//! Items are kept in ordered maps so an unchanged snapshot always encodes
//! to the same bytes.

mod collection;
mod file;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Post, RefreshToken, User};
use crate::error::{Result, StoreError};

pub use collection::EntityCollection;
pub use file::SnapshotFile;

/// The full state of the store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub posts: EntityCollection<Post>,
    pub users: EntityCollection<User>,
    pub refresh_tokens: BTreeMap<String, RefreshToken>,
}

impl Snapshot {
    /// An empty snapshot: every counter at 1, every map empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Encode to the on-disk JSON document
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| StoreError::Corruption(format!("failed to encode snapshot: {}", e)))
    }

    /// Decode the on-disk JSON document and check collection invariants
    pub fn decode(data: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(data)
            .map_err(|e| StoreError::Corruption(format!("failed to decode snapshot: {}", e)))?;

        snapshot.validate().map_err(StoreError::Corruption)?;

        Ok(snapshot)
    }

    /// Linear scan for a user with exactly this email
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        self.posts.validate("posts")?;
        self.users.validate("users")?;

        for (key, record) in &self.refresh_tokens {
            if *key != record.token {
                return Err(format!(
                    "refresh_tokens: entry key does not match its token field ({} bytes vs {} bytes)",
                    key.len(),
                    record.token.len()
                ));
            }
        }

        Ok(())
    }
}
