//! Mechanism descriptors and validator resolution.
//!
//! A descriptor is a configuration string of the form `<kind>|<target>`, e.g.
//! `file|%CONFIG_DIR%/tokens.db`. Parsing is kind-agnostic; resolving a parsed
//! descriptor picks a [`CredentialValidator`] strategy for the kind. Unknown
//! kinds resolve to [`DenyAll`].

use core::str::FromStr;
use std::sync::Arc;

use crate::kdf::KdfParams;
use crate::validator::FileValidator;
use crate::{AuthError, ConfigError};

pub const DESCRIPTOR_DELIMITER: char = '|';

/// A parsed `<kind>|<target>` descriptor.
///
/// `target` is kept verbatim, including any configuration placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanismDescriptor {
    kind: String,
    target: String,
}

/// Parse a `<kind>|<target>` descriptor.
///
/// The delimiter must appear exactly once and both sides must be non-empty.
pub fn parse_mechanism_descriptor(raw: &str) -> Result<MechanismDescriptor, ConfigError> {
    let (kind, target) = raw
        .split_once(DESCRIPTOR_DELIMITER)
        .ok_or(ConfigError::MissingDelimiter)?;

    if target.contains(DESCRIPTOR_DELIMITER) {
        return Err(ConfigError::TooManyDelimiters);
    }

    let kind = kind.trim();
    if kind.is_empty() {
        return Err(ConfigError::EmptyKind);
    }
    if target.trim().is_empty() {
        return Err(ConfigError::EmptyTarget);
    }

    Ok(MechanismDescriptor {
        kind: kind.to_string(),
        target: target.to_string(),
    })
}

impl MechanismDescriptor {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Same kind, different target (used once placeholders are resolved).
    pub fn with_target(&self, target: impl Into<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            target: target.into(),
        }
    }
}

impl FromStr for MechanismDescriptor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mechanism_descriptor(s)
    }
}

impl core::fmt::Display for MechanismDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.kind, DESCRIPTOR_DELIMITER, self.target)
    }
}

/// Mechanism kinds this crate can verify credentials with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MechanismKind {
    /// PBKDF2 token store on the local filesystem; target is its path.
    File,
}

impl MechanismKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MechanismKind::File => "file",
        }
    }

    fn build(self, target: &str, settings: &MechanismSettings) -> Arc<dyn CredentialValidator> {
        match self {
            MechanismKind::File => {
                let mut validator = FileValidator::new(target).with_params(settings.kdf);
                if let Some(max) = settings.max_records {
                    validator = validator.with_max_records(max);
                }
                Arc::new(validator)
            }
        }
    }
}

impl FromStr for MechanismKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(MechanismKind::File),
            other => Err(AuthError::UnsupportedMechanism(other.to_string())),
        }
    }
}

impl core::fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy deciding whether a presented secret is authorized.
///
/// Implementations must be fail-closed: any error is a `false`.
pub trait CredentialValidator: Send + Sync {
    fn validate(&self, secret: &[u8]) -> bool;
}

/// Validator for mechanism kinds that are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyAll {
    kind: String,
}

impl DenyAll {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl CredentialValidator for DenyAll {
    fn validate(&self, _secret: &[u8]) -> bool {
        tracing::debug!(kind = %self.kind, "unsupported mechanism; denying");
        false
    }
}

/// Tunables passed to the strategy built for a descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MechanismSettings {
    pub kdf: KdfParams,
    pub max_records: Option<usize>,
}

/// Resolved authentication mechanism, shared across request handlers.
#[derive(Clone)]
pub struct Authenticator {
    label: String,
    validator: Arc<dyn CredentialValidator>,
}

impl Authenticator {
    /// Wrap a custom strategy.
    pub fn new(label: impl Into<String>, validator: Arc<dyn CredentialValidator>) -> Self {
        Self {
            label: label.into(),
            validator,
        }
    }

    /// Resolve a descriptor whose target is already fully resolved.
    pub fn resolve(descriptor: &MechanismDescriptor, settings: MechanismSettings) -> Self {
        match descriptor.kind().parse::<MechanismKind>() {
            Ok(kind) => Self {
                label: kind.as_str().to_string(),
                validator: kind.build(descriptor.target(), &settings),
            },
            Err(e) => {
                tracing::warn!(error = %e, "authentication will deny every request");
                Self::new(descriptor.kind(), Arc::new(DenyAll::new(descriptor.kind())))
            }
        }
    }

    /// Name of the mechanism in use (the descriptor kind).
    pub fn mechanism(&self) -> &str {
        &self.label
    }

    pub fn authorize(&self, secret: &[u8]) -> bool {
        self.validator.validate(secret)
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator")
            .field("mechanism", &self.label)
            .finish_non_exhaustive()
    }
}
