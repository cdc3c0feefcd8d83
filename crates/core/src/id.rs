//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a blog record.
///
/// Ids are assigned by the persistence layer (row ids), so there is no
/// constructor that mints a fresh one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(i64);

impl BlogId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for BlogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for BlogId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<BlogId> for i64 {
    fn from(value: BlogId) -> Self {
        value.0
    }
}

impl FromStr for BlogId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("BlogId: {e}")))?;
        if value <= 0 {
            return Err(DomainError::invalid_id(format!(
                "BlogId: must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        let id: BlogId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric_and_non_positive_ids() {
        assert!(matches!("abc".parse::<BlogId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("0".parse::<BlogId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("-3".parse::<BlogId>(), Err(DomainError::InvalidId(_))));
    }
}
