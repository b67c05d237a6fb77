//! Post entity

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A short text message
///
/// Body length is validated upstream; the store accepts any string.
/// Posts are immutable once created, apart from deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub body: String,
    pub author_id: EntityId,
}
