//! Error taxonomy for credential verification.
//!
//! Only [`ConfigError`] ever leaves this crate as an error: it is raised while
//! parsing configuration at startup. Every other variant is recovered inside
//! the validator and collapses into a `false` verdict.

use std::path::PathBuf;

use thiserror::Error;

/// A mechanism descriptor could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mechanism descriptor is missing the '|' delimiter")]
    MissingDelimiter,

    #[error("mechanism descriptor contains more than one '|' delimiter")]
    TooManyDelimiters,

    #[error("mechanism descriptor has an empty kind")]
    EmptyKind,

    #[error("mechanism descriptor has an empty target")]
    EmptyTarget,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid mechanism configuration: {0}")]
    Config(#[from] ConfigError),

    /// The token store could not be opened or read.
    #[error("token store unavailable at {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single token-store record could not be decoded.
    #[error("malformed token record: {0}")]
    MalformedRecord(String),

    #[error("unsupported authentication mechanism '{0}'")]
    UnsupportedMechanism(String),
}

impl AuthError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }
}
