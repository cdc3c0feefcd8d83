//! Blog persistence abstractions.
//!
//! Stores are plain owned objects handed to the HTTP layer; there is no
//! process-wide connection handle.

pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use inkpost_core::{Blog, BlogDraft, BlogId, DomainError};

pub use in_memory::InMemoryBlogStore;
pub use sqlite::SqliteBlogStore;

#[derive(Debug, Error)]
pub enum BlogStoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// CRUD contract over blog records.
///
/// `create` and `update` validate the draft; `update` and `delete` report
/// `DomainError::NotFound` for unknown ids.
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn create(&self, draft: BlogDraft) -> Result<Blog, BlogStoreError>;
    /// All records, ordered by id.
    async fn list(&self) -> Result<Vec<Blog>, BlogStoreError>;
    async fn get(&self, id: BlogId) -> Result<Option<Blog>, BlogStoreError>;
    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<Blog, BlogStoreError>;
    async fn delete(&self, id: BlogId) -> Result<(), BlogStoreError>;
}

#[async_trait]
impl<S> BlogStore for Arc<S>
where
    S: BlogStore + ?Sized,
{
    async fn create(&self, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        (**self).create(draft).await
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogStoreError> {
        (**self).list().await
    }

    async fn get(&self, id: BlogId) -> Result<Option<Blog>, BlogStoreError> {
        (**self).get(id).await
    }

    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: BlogId) -> Result<(), BlogStoreError> {
        (**self).delete(id).await
    }
}
