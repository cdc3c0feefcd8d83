//! Infrastructure layer: configuration loading and blog persistence.

pub mod blog_store;
pub mod config;

pub use blog_store::{BlogStore, BlogStoreError, InMemoryBlogStore, SqliteBlogStore};
pub use config::{AppConfig, ConfigLoadError};
