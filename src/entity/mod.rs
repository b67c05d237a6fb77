//! Entity Module
//!
//! Plain records stored in the snapshot.
//!
//! ## Relationships
//! `Post::author_id` and `RefreshToken::user_id` are soft references to
//! `User::id`. The store never enforces them and never cascades deletes,
//! so dangling references are possible.

mod post;
mod user;
mod refresh_token;

pub use post::Post;
pub use user::User;
pub use refresh_token::{
    default_refresh_token_ttl, RefreshToken, DEFAULT_REFRESH_TOKEN_TTL_DAYS, TOKEN_BYTES,
};

/// Primary key type shared by posts and users
pub type EntityId = u64;
