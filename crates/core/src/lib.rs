//! `inkpost-core`: blog domain types, ids and validation errors.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod blog;
pub mod error;
pub mod id;

pub use blog::{Blog, BlogDraft};
pub use error::{DomainError, DomainResult};
pub use id::BlogId;
