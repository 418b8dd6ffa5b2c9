//! qbitpass Core
//!
//! Credential codec for qBittorrent's password storage format.
//!
//! # Format
//!
//! A stored credential is a single string:
//!
//! ```text
//! base64(salt) ":" base64(PBKDF2-HMAC-SHA512(password, salt, 100000, 64))
//! ```
//!
//! with a 16-byte random salt and a 64-byte derived key, both standard
//! base64 with padding. The parameters are fixed by qBittorrent's
//! `WebUI\Password_PBKDF2` contract and are not configurable.

pub mod credential;
pub mod memory;

pub use credential::{derive, verify, CredentialError, CredentialRecord};
