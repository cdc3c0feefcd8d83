use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use inkpost_core::{Blog, BlogDraft, BlogId, DomainError};

use super::{BlogStore, BlogStoreError};

/// In-memory blog store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<BlogId, Blog>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> BlogStoreError {
    BlogStoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn create(&self, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        draft.validate()?;
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.last_id += 1;
        let id = BlogId::from_i64(inner.last_id);
        let blog = draft.into_blog(id, Utc::now());
        inner.rows.insert(id, blog.clone());
        Ok(blog)
    }

    async fn list(&self) -> Result<Vec<Blog>, BlogStoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get(&self, id: BlogId) -> Result<Option<Blog>, BlogStoreError> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(&self, id: BlogId, draft: BlogDraft) -> Result<Blog, BlogStoreError> {
        draft.validate()?;
        let mut inner = self.inner.write().map_err(poisoned)?;
        let blog = inner.rows.get_mut(&id).ok_or(DomainError::NotFound)?;
        blog.apply_draft(draft);
        Ok(blog.clone())
    }

    async fn delete(&self, id: BlogId) -> Result<(), BlogStoreError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.rows.remove(&id).map(|_| ()).ok_or_else(|| DomainError::NotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog_store::contract;

    #[tokio::test]
    async fn crud_lifecycle() {
        contract::crud_lifecycle(&InMemoryBlogStore::new()).await;
    }

    #[tokio::test]
    async fn missing_ids_and_invalid_drafts() {
        contract::missing_ids_and_invalid_drafts(&InMemoryBlogStore::new()).await;
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryBlogStore::new();
        let a = store.create(BlogDraft::new("a", "t", "", "")).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(BlogDraft::new("b", "t", "", "")).await.unwrap();
        assert!(b.id > a.id);
    }
}
