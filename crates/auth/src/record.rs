//! Token-store record codec.
//!
//! On-disk format (one record per line, `:`-delimited):
//!
//! ```text
//! label:field2:base64(salt):hash
//! ```
//!
//! - `label` identifies the record (not used for matching).
//! - `field2` is carried by the format but not consumed by validation.
//! - the salt uses the standard base64 alphabet; it is written unpadded and
//!   read with or without padding.
//! - `hash` is the derived key written as its literal bytes.
//!
//! Fields beyond the fourth are ignored on read.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::AuthError;

pub const FIELD_DELIMITER: u8 = b':';

const MIN_FIELDS: usize = 4;

/// Standard alphabet, unpadded on encode, padding-indifferent on decode.
const SALT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One decoded line of the token store.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub label: String,
    pub field2: String,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl core::fmt::Debug for TokenRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenRecord")
            .field("label", &self.label)
            .field("field2", &self.field2)
            .field("salt_len", &self.salt.len())
            .field("hash_len", &self.hash.len())
            .finish()
    }
}

impl TokenRecord {
    /// Decode one raw line (without its line terminator).
    pub fn decode(line: &[u8]) -> Result<Self, AuthError> {
        let fields: Vec<&[u8]> = line.split(|b| *b == FIELD_DELIMITER).collect();
        if fields.len() < MIN_FIELDS {
            return Err(AuthError::malformed(format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                fields.len()
            )));
        }

        let label = utf8_field(fields[0], "label")?;
        let field2 = utf8_field(fields[1], "field2")?;
        let salt_encoded = utf8_field(fields[2], "salt")?;
        let salt = decode_salt(&salt_encoded)?;

        let hash = fields[3].to_vec();
        if hash.is_empty() {
            return Err(AuthError::malformed("empty hash field"));
        }

        Ok(Self {
            label,
            field2,
            salt,
            hash,
        })
    }

    /// Encode the record as one store line (without a line terminator).
    ///
    /// Fails if any field would corrupt the line structure: a delimiter or a
    /// line break inside a field, or an empty salt or hash.
    pub fn to_line(&self) -> Result<Vec<u8>, AuthError> {
        let text_fields = [("label", self.label.as_bytes()), ("field2", self.field2.as_bytes())];
        for (name, value) in text_fields {
            if value.iter().any(|b| is_structural(*b)) {
                return Err(AuthError::malformed(format!(
                    "{name} contains a delimiter or line break"
                )));
            }
        }
        if self.salt.is_empty() {
            return Err(AuthError::malformed("empty salt"));
        }
        if self.hash.is_empty() || self.hash.iter().any(|b| is_structural(*b)) {
            return Err(AuthError::malformed(
                "hash is empty or contains a delimiter or line break",
            ));
        }

        let salt = encode_salt(&self.salt);
        let mut line = Vec::with_capacity(
            self.label.len() + self.field2.len() + salt.len() + self.hash.len() + 3,
        );
        line.extend_from_slice(self.label.as_bytes());
        line.push(FIELD_DELIMITER);
        line.extend_from_slice(self.field2.as_bytes());
        line.push(FIELD_DELIMITER);
        line.extend_from_slice(salt.as_bytes());
        line.push(FIELD_DELIMITER);
        line.extend_from_slice(&self.hash);
        Ok(line)
    }
}

/// Encode a salt the way the store writes it (standard alphabet, no padding).
pub fn encode_salt(salt: &[u8]) -> String {
    SALT_ENGINE.encode(salt)
}

/// Decode a stored salt; both padded and unpadded inputs are accepted.
pub fn decode_salt(encoded: &str) -> Result<Vec<u8>, AuthError> {
    if encoded.is_empty() {
        return Err(AuthError::malformed("empty salt field"));
    }
    SALT_ENGINE
        .decode(encoded)
        .map_err(|e| AuthError::malformed(format!("salt is not valid base64: {e}")))
}

fn utf8_field(raw: &[u8], name: &str) -> Result<String, AuthError> {
    String::from_utf8(raw.to_vec())
        .map_err(|_| AuthError::malformed(format!("{name} is not valid UTF-8")))
}

fn is_structural(b: u8) -> bool {
    matches!(b, FIELD_DELIMITER | b'\n' | b'\r')
}
