//! Post operations

use tracing::debug;

use crate::entity::{EntityId, Post};
use crate::error::{Result, StoreError};

use super::Store;

const ENTITY: &str = "post";

impl Store {
    /// Create a post with the next free id
    ///
    /// Body length is not checked here.
    pub fn create_post(&self, body: impl Into<String>, author_id: EntityId) -> Result<Post> {
        let body = body.into();

        let post = self.update(|snapshot| {
            let post = snapshot.posts.insert_with(|id| Post {
                id,
                body,
                author_id,
            })?;
            Ok(post.clone())
        })?;

        debug!(post_id = post.id, author_id, "created post");
        Ok(post)
    }

    /// All posts, ascending by id
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.load()?.posts.into_values())
    }

    /// Posts written by one author, ascending by id
    pub fn list_posts_by_author(&self, author_id: EntityId) -> Result<Vec<Post>> {
        let mut posts = self.list_posts()?;
        posts.retain(|post| post.author_id == author_id);
        Ok(posts)
    }

    pub fn get_post(&self, id: EntityId) -> Result<Post> {
        self.load()?
            .posts
            .remove(id)
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    /// Delete a post; its id is never handed out again
    pub fn delete_post(&self, id: EntityId) -> Result<()> {
        self.update(|snapshot| {
            snapshot
                .posts
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| StoreError::not_found(ENTITY, id))
        })?;

        debug!(post_id = id, "deleted post");
        Ok(())
    }
}
