//! Credential derivation and verification
//!
//! Implements the password hash format qBittorrent stores in
//! `WebUI\Password_PBKDF2`: a random 16-byte salt and a 64-byte
//! PBKDF2-HMAC-SHA512 key, both base64-encoded and joined with `:`.
//!
//! # Security Notes
//!
//! - The salt comes from the OS CSPRNG; an entropy failure aborts derivation
//!   rather than falling back to a weak salt
//! - Key comparison is constant-time (`subtle`)
//! - A malformed stored credential fails closed: `verify` returns `false`
//!   and never panics, so a broken record is indistinguishable from a wrong
//!   password

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const KEY_LEN: usize = 64;

/// PBKDF2 iteration count (fixed by qBittorrent, not configurable)
pub const ITERATIONS: u32 = 100_000;

/// Serialized record length: 24 base64 chars of salt, one `:`,
/// 88 base64 chars of key
pub const RECORD_LEN: usize = 113;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Entropy source failure: {0}")]
    Entropy(String),
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

/// A derived credential: salt plus PBKDF2 key.
///
/// Immutable once produced — changing the password means deriving a brand-new
/// record. Rendered with [`Display`](std::fmt::Display) as the storable
/// `base64(salt):base64(key)` string. The key bytes are zeroized on drop.
pub struct CredentialRecord {
    salt: [u8; SALT_LEN],
    key: [u8; KEY_LEN],
}

impl CredentialRecord {
    /// The random per-record salt.
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// The PBKDF2-HMAC-SHA512 derived key.
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            STANDARD.encode(self.salt),
            STANDARD.encode(self.key)
        )
    }
}

impl Drop for CredentialRecord {
    fn drop(&mut self) {
        // The salt is public; only the key needs scrubbing
        self.key.zeroize();
    }
}

/// Derive a credential record from a password.
///
/// Generates a fresh 16-byte salt from the OS CSPRNG and stretches the
/// UTF-8 password bytes through PBKDF2-HMAC-SHA512 with 100000 iterations.
/// Two calls with the same password produce different records.
///
/// # Errors
///
/// [`CredentialError::Entropy`] if the OS random source fails. There is no
/// fallback — deriving from a weak or absent salt is never acceptable.
///
/// # Example
/// ```
/// let record = qbitpass_core::derive("hunter2").unwrap();
/// assert!(qbitpass_core::verify(&record.to_string(), "hunter2"));
/// ```
pub fn derive(password: &str) -> Result<CredentialRecord, CredentialError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| CredentialError::Entropy(e.to_string()))?;

    let mut key = [0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha512>>(password.as_bytes(), &salt, ITERATIONS, &mut key)
        .map_err(|e| CredentialError::KeyDerivation(e.to_string()))?;

    Ok(CredentialRecord { salt, key })
}

/// Verify a password against a stored credential string.
///
/// The secret is split on the *first* `:`; both halves must decode as
/// standard base64 with padding. Any structural problem — missing separator,
/// bad base64, empty salt or key — returns `false` without panicking.
///
/// The KDF output length follows the decoded stored key, so a truncated
/// record yields a failing comparison instead of an internal length fault.
/// Both correct and incorrect passwords pay the full KDF cost, and the final
/// comparison is constant-time.
pub fn verify(secret: &str, password: &str) -> bool {
    let Some((salt_b64, key_b64)) = secret.split_once(':') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = STANDARD.decode(key_b64) else {
        return false;
    };
    // A zero-length salt or key is malformed, not a verifiable record.
    // Rejecting here also keeps a degenerate empty-vs-empty comparison from
    // succeeding vacuously.
    if salt.is_empty() || expected.is_empty() {
        return false;
    }

    let mut derived = Zeroizing::new(vec![0u8; expected.len()]);
    if pbkdf2::<Hmac<Sha512>>(password.as_bytes(), &salt, ITERATIONS, &mut derived).is_err() {
        return false;
    }

    derived.as_slice().ct_eq(expected.as_slice()).into()
}
