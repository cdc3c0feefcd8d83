//! Errors raised by blog domain rules.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures a blog operation can report regardless of where records live.
///
/// Storage and transport failures are wrapped by the layers that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A draft was rejected, e.g. an empty author or title.
    #[error("invalid blog: {0}")]
    Validation(String),

    /// A path segment could not be turned into a `BlogId`.
    #[error("invalid blog id: {0}")]
    InvalidId(String),

    #[error("blog not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_rule() {
        assert_eq!(
            DomainError::validation("title must not be empty").to_string(),
            "invalid blog: title must not be empty"
        );
        assert_eq!(DomainError::invalid_id("abc").to_string(), "invalid blog id: abc");
        assert!(DomainError::NotFound.is_not_found());
        assert!(!DomainError::validation("x").is_not_found());
    }
}
