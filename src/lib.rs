//! # docstore
//!
//! A concurrent, file-backed document store with:
//! - One JSON document holding the full snapshot
//! - Typed collections for posts, users and refresh tokens
//! - Monotonic id allocation and email uniqueness
//! - Lazy expiry of refresh tokens
//! - A single reader/writer lock coordinating all callers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Callers (one per request)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ create / list / get / update / delete
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │        (RwLock: shared load / exclusive persist)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ load → mutate → persist
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  Snapshot   │          │ SnapshotFile │
//!   │ (in memory) │          │ (JSON, disk) │
//!   └─────────────┘          └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use docstore::Store;
//!
//! let store = Store::open_path("database.json")?;
//! let post = store.create_post("hello", 1)?;
//! assert_eq!(store.get_post(post.id)?.body, "hello");
//! # Ok::<(), docstore::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod entity;
pub mod snapshot;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{LockScope, StoreConfig};
pub use entity::{EntityId, Post, RefreshToken, User};
pub use snapshot::{EntityCollection, Snapshot};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of docstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
