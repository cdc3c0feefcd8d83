//! Key derivation engine.
//!
//! Token-store format v1 fixes these parameters:
//!
//! | parameter          | value       |
//! |--------------------|-------------|
//! | PRF                | HMAC-SHA3-512 |
//! | iterations         | 10 000      |
//! | derived key length | 20 bytes    |
//!
//! They are part of the on-disk contract: every stored hash was produced with
//! them, so changing any of them invalidates all previously issued records.

use pbkdf2::pbkdf2_hmac;
use sha3::Sha3_512;
use zeroize::Zeroizing;

/// PBKDF2 parameters (the PRF hash is fixed to SHA3-512).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
    pub key_len: usize,
}

impl KdfParams {
    /// Parameters of token-store format v1.
    pub const STORE_FORMAT_V1: Self = Self {
        iterations: 10_000,
        key_len: 20,
    };
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::STORE_FORMAT_V1
    }
}

/// Key material derived from a presented secret.
///
/// Zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey(Zeroizing<Vec<u8>>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "DerivedKey(<redacted; {} bytes>)", self.0.len())
    }
}

/// Derive `params.key_len` bytes from `secret` and `salt`.
///
/// Pure CPU work; safe to call once per record within a request.
pub fn derive_key(secret: &[u8], salt: &[u8], params: KdfParams) -> DerivedKey {
    let mut out = Zeroizing::new(vec![0u8; params.key_len]);
    pbkdf2_hmac::<Sha3_512>(secret, salt, params.iterations, out.as_mut_slice());
    DerivedKey(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};

    /// Single-block PBKDF2 (RFC 8018 §5.2) written out against `hmac`, used to
    /// pin the PRF to HMAC-SHA3-512.
    fn reference_pbkdf2_sha3_512(
        secret: &[u8],
        salt: &[u8],
        iterations: u32,
        len: usize,
    ) -> Vec<u8> {
        assert!(len <= 64);
        let prf = || Hmac::<Sha3_512>::new_from_slice(secret).unwrap();

        let mut mac = prf();
        mac.update(salt);
        mac.update(&1u32.to_be_bytes());
        let mut u = mac.finalize().into_bytes().to_vec();
        let mut t = u.clone();

        for _ in 1..iterations {
            let mut mac = prf();
            mac.update(&u);
            u = mac.finalize().into_bytes().to_vec();
            for (acc, b) in t.iter_mut().zip(&u) {
                *acc ^= *b;
            }
        }

        t.truncate(len);
        t
    }

    #[test]
    fn store_format_v1_parameters_are_pinned() {
        let p = KdfParams::default();
        assert_eq!(p.iterations, 10_000);
        assert_eq!(p.key_len, 20);
        assert_eq!(p, KdfParams::STORE_FORMAT_V1);
    }

    #[test]
    fn derives_fixed_length_deterministic_keys() {
        let a = derive_key(b"s3cret", b"0123456789abcdef", KdfParams::default());
        let b = derive_key(b"s3cret", b"0123456789abcdef", KdfParams::default());
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
    }

    #[test]
    fn secret_and_salt_both_change_the_key() {
        let base = derive_key(b"s3cret", b"salt-one-16bytes", KdfParams::default());
        let other_secret = derive_key(b"s3cres", b"salt-one-16bytes", KdfParams::default());
        let other_salt = derive_key(b"s3cret", b"salt-two-16bytes", KdfParams::default());
        assert_ne!(base, other_secret);
        assert_ne!(base, other_salt);
    }

    #[test]
    fn matches_reference_hmac_sha3_512_construction() {
        let params = KdfParams {
            iterations: 3,
            key_len: 20,
        };
        let got = derive_key(b"password", b"NaCl-salt", params);
        let want = reference_pbkdf2_sha3_512(b"password", b"NaCl-salt", 3, 20);
        assert_eq!(got.as_bytes(), want.as_slice());
    }

    #[test]
    fn debug_output_never_contains_key_bytes() {
        let key = derive_key(b"s3cret", b"salt", KdfParams::default());
        let rendered = format!("{key:?}");
        assert_eq!(rendered, "DerivedKey(<redacted; 20 bytes>)");
    }
}
