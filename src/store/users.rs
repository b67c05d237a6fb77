//! User operations
//!
//! Email uniqueness is checked against the same snapshot the mutation is
//! applied to, so under `LockScope::Operation` two concurrent registrations
//! with one email cannot both succeed.

use tracing::debug;

use crate::entity::{EntityId, User};
use crate::error::{Result, StoreError};

use super::Store;

const ENTITY: &str = "user";

impl Store {
    /// Register a user; fails with `AlreadyExists` if the email is taken
    ///
    /// Emails compare exactly (case-sensitive). New users start unpromoted.
    pub fn create_user(
        &self,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Result<User> {
        let email = email.into();
        let credential_hash = credential_hash.into();

        let user = self.update(|snapshot| {
            if snapshot.find_user_by_email(&email).is_some() {
                return Err(StoreError::already_exists(ENTITY, &email));
            }

            let user = snapshot.users.insert_with(|id| User {
                id,
                email,
                credential_hash,
                promoted: false,
            })?;
            Ok(user.clone())
        })?;

        debug!(user_id = user.id, "created user");
        Ok(user)
    }

    pub fn get_user(&self, id: EntityId) -> Result<User> {
        self.load()?
            .users
            .remove(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.load()?
            .find_user_by_email(email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ENTITY, email))
    }

    /// Overwrite a user's email and credential hash
    ///
    /// Keeping one's own email is allowed; taking another user's is not.
    pub fn update_user(
        &self,
        id: EntityId,
        email: impl Into<String>,
        credential_hash: impl Into<String>,
    ) -> Result<User> {
        let email = email.into();
        let credential_hash = credential_hash.into();

        let user = self.update(|snapshot| {
            if let Some(other) = snapshot.find_user_by_email(&email) {
                if other.id != id {
                    return Err(StoreError::already_exists(ENTITY, &email));
                }
            }

            let user = snapshot
                .users
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

            user.email = email;
            user.credential_hash = credential_hash;
            Ok(user.clone())
        })?;

        debug!(user_id = id, "updated user");
        Ok(user)
    }

    /// Set or clear the promoted flag
    pub fn set_promoted(&self, id: EntityId, promoted: bool) -> Result<User> {
        let user = self.update(|snapshot| {
            let user = snapshot
                .users
                .get_mut(id)
                .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

            user.promoted = promoted;
            Ok(user.clone())
        })?;

        debug!(user_id = id, promoted, "set promoted flag");
        Ok(user)
    }
}
