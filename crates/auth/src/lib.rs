//! `inkpost-auth`: pluggable credential verification.
//!
//! This crate is intentionally decoupled from HTTP and storage. It turns a
//! mechanism descriptor (`<kind>|<target>`) into a validator and answers one
//! question per request: is this presented secret authorized?
//!
//! The only mechanism implemented is `file`: a line-oriented token store of
//! `label:field2:base64(salt):hash` records checked with PBKDF2-HMAC-SHA3-512.

pub mod error;
pub mod kdf;
pub mod mechanism;
pub mod record;
pub mod store;
pub mod validator;

pub use error::{AuthError, ConfigError};
pub use kdf::{DerivedKey, KdfParams, derive_key};
pub use mechanism::{
    Authenticator, CredentialValidator, DenyAll, MechanismDescriptor, MechanismKind,
    MechanismSettings, parse_mechanism_descriptor,
};
pub use record::TokenRecord;
pub use store::{StoreLine, TokenLines, open_token_store};
pub use validator::{FileValidator, constant_time_eq, validate_via_file};
