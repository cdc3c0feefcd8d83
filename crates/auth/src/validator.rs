//! Credential comparator and the file-backed validator.
//!
//! Every failure path resolves to a `false` verdict: a missing store, an I/O
//! error mid-scan, and a wrong secret all look the same to the caller.

use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;

use crate::kdf::{KdfParams, derive_key};
use crate::mechanism::CredentialValidator;
use crate::record::TokenRecord;
use crate::store::open_token_store;
use crate::AuthError;

/// Constant-time byte comparison for secret material.
///
/// Slices of different length compare unequal; lengths are not secret.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Validates secrets against a token store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidator {
    path: PathBuf,
    params: KdfParams,
    max_records: Option<usize>,
}

impl FileValidator {
    /// `path` must already be fully resolved (no config placeholders).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            params: KdfParams::STORE_FORMAT_V1,
            max_records: None,
        }
    }

    pub fn with_params(mut self, params: KdfParams) -> Self {
        self.params = params;
        self
    }

    /// Stop scanning after `max` records (denying if none matched so far).
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = Some(max);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decide whether `secret` is authorized by any record in the store.
    ///
    /// Records are checked in file order and the first match wins. Malformed
    /// records are skipped.
    pub fn validate(&self, secret: &[u8]) -> bool {
        if secret.is_empty() {
            tracing::debug!(path = %self.path.display(), "empty credential denied");
            return false;
        }

        match self.find_match(secret) {
            Ok(Some(label)) => {
                tracing::debug!(path = %self.path.display(), label = %label, "credential accepted");
                true
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no matching token record");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "token store unavailable; denying");
                false
            }
        }
    }

    /// Scan the store; returns the label of the first matching record.
    fn find_match(&self, secret: &[u8]) -> Result<Option<String>, AuthError> {
        let mut scanned = 0usize;

        for line in open_token_store(&self.path)? {
            let line = line?;

            if let Some(max) = self.max_records {
                if scanned >= max {
                    tracing::warn!(
                        path = %self.path.display(),
                        max_records = max,
                        "token store exceeds scan limit; remaining records ignored"
                    );
                    return Ok(None);
                }
            }
            scanned += 1;

            let record = match TokenRecord::decode(&line.bytes) {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(
                        path = %self.path.display(),
                        line = line.number,
                        error = %e,
                        "skipping malformed token record"
                    );
                    continue;
                }
            };

            let key = derive_key(secret, &record.salt, self.params);
            if constant_time_eq(key.as_bytes(), &record.hash) {
                return Ok(Some(record.label));
            }
        }

        Ok(None)
    }
}

impl CredentialValidator for FileValidator {
    fn validate(&self, secret: &[u8]) -> bool {
        FileValidator::validate(self, secret)
    }
}

/// Validate `secret` against the store at `path` with store-format defaults.
pub fn validate_via_file(secret: &[u8], path: impl AsRef<Path>) -> bool {
    FileValidator::new(path.as_ref()).validate(secret)
}
