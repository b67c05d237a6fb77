//! User entity

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A registered account
///
/// `email` is unique across all users (exact, case-sensitive match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub credential_hash: String,
    pub promoted: bool,
}
