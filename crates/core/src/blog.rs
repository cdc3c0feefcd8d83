//! Blog records: the entity served by the CRUD API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BlogId, DomainError, DomainResult};

/// A persisted blog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub author: String,
    pub title: String,
    pub content: String,
    pub image: String,
    /// Creation time, set once by the store on insert.
    pub ctime: DateTime<Utc>,
}

/// Client-supplied fields of a blog record (create and update payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDraft {
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
}

impl BlogDraft {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            content: content.into(),
            image: image.into(),
        }
    }

    /// Check the draft before it reaches a store.
    ///
    /// Lookups treat an empty author as "no record", so it must never be
    /// persisted.
    pub fn validate(&self) -> DomainResult<()> {
        if self.author.trim().is_empty() {
            return Err(DomainError::validation("author must not be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        Ok(())
    }

    /// Materialize the draft as a stored record.
    pub fn into_blog(self, id: BlogId, ctime: DateTime<Utc>) -> Blog {
        Blog {
            id,
            author: self.author,
            title: self.title,
            content: self.content,
            image: self.image,
            ctime,
        }
    }
}

impl Blog {
    /// Replace the client-editable fields, keeping `id` and `ctime`.
    pub fn apply_draft(&mut self, draft: BlogDraft) {
        self.author = draft.author;
        self.title = draft.title;
        self.content = draft.content;
        self.image = draft.image;
    }
}
