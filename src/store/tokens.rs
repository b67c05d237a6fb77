//! Refresh token operations

use std::io;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, warn};

use crate::entity::{EntityId, RefreshToken, TOKEN_BYTES};
use crate::error::{Result, StoreError};

use super::Store;

const ENTITY: &str = "refresh token";

impl Store {
    /// Issue a fresh random token for a user
    ///
    /// Collisions are not checked for; the keyspace is 256 bits.
    pub fn issue_refresh_token(
        &self,
        user_id: EntityId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken> {
        let record = RefreshToken {
            token: generate_token()?,
            user_id,
            expires_at,
        };

        self.update(|snapshot| {
            snapshot
                .refresh_tokens
                .insert(record.token.clone(), record.clone());
            Ok(())
        })?;

        debug!(user_id, expires_at = %record.expires_at, "issued refresh token");
        Ok(record)
    }

    /// Issue a token that expires `ttl` from now
    ///
    /// Fails with `InvalidInput` if the expiry is not representable.
    pub fn issue_refresh_token_with_ttl(
        &self,
        user_id: EntityId,
        ttl: Duration,
    ) -> Result<RefreshToken> {
        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            StoreError::InvalidInput(format!("refresh token ttl out of range: {}", ttl))
        })?;

        self.issue_refresh_token(user_id, expires_at)
    }

    /// Resolve a token to its owning user id
    ///
    /// An expired token is deleted and reported as `Expired`; later checks
    /// of the same token fail with `NotFound`.
    pub fn check_refresh_token(&self, token: &str) -> Result<EntityId> {
        self.check_refresh_token_at(token, Utc::now())
    }

    /// Same as `check_refresh_token` with an explicit clock reading
    pub fn check_refresh_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<EntityId> {
        let snapshot = self.load()?;
        let record = snapshot
            .refresh_tokens
            .get(token)
            .ok_or_else(|| StoreError::not_found(ENTITY, token_hint(token)))?;

        if record.is_expired_at(now) {
            warn!(
                user_id = record.user_id,
                expires_at = %record.expires_at,
                "refresh token expired, removing"
            );

            self.update(|snapshot| {
                snapshot.refresh_tokens.remove(token);
                Ok(())
            })?;

            return Err(StoreError::Expired);
        }

        Ok(record.user_id)
    }

    pub fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        let record = self.update(|snapshot| {
            snapshot
                .refresh_tokens
                .remove(token)
                .ok_or_else(|| StoreError::not_found(ENTITY, token_hint(token)))
        })?;

        debug!(user_id = record.user_id, "revoked refresh token");
        Ok(())
    }
}

/// 32 bytes from the OS CSPRNG, hex-encoded (64 chars)
fn generate_token() -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| StoreError::Io(io::Error::other(e)))?;

    Ok(hex::encode(bytes))
}

/// Tokens are credentials; errors only carry a short prefix
fn token_hint(token: &str) -> String {
    match token.get(..8) {
        Some(prefix) if prefix.len() < token.len() => format!("{}…", prefix),
        _ => token.to_string(),
    }
}
