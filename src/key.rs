//! # Public Key Material
//!
//! The issuer's view of a key is deliberately narrow: 32 raw bytes plus a
//! type tag. Private key material never crosses into this crate — signing
//! happens behind the [`Signer`](crate::Signer) capability, and all we get
//! back are public bytes and signatures.
//!
//! The bytes are treated as opaque. We never verify signatures against
//! them, never check they lie on the curve; that is the relying party's
//! job. What we do guarantee is the length, because the multicodec and
//! JWK encodings both assume exactly 32 bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config;

/// Length of a raw Ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Errors that can occur while constructing key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The supplied byte slice is not the right length for the key type.
    #[error("invalid public key: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Bytes required by the key type.
        expected: usize,
        /// Bytes actually supplied.
        got: usize,
    },
}

/// The cryptographic family a public key belongs to.
///
/// Currently a one-variant enum. That is not an accident: the multicodec
/// tag and the JWK `crv` field both depend on the key type, and making the
/// tag an explicit property of the type means adding secp256k1 later is a
/// new variant, not an archaeology project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Ed25519, the only key type the token format supports today.
    Ed25519,
}

impl KeyType {
    /// The multicodec tag prepended to raw key bytes during DID derivation.
    pub fn multicodec_prefix(&self) -> [u8; 2] {
        match self {
            KeyType::Ed25519 => config::ED25519_MULTICODEC_PREFIX,
        }
    }
}

/// A public key as resolved by a [`Signer`](crate::Signer).
///
/// Safe to share, log, and embed in tokens — that's its whole job. Equality
/// and hashing are over the raw bytes, so two keys compare equal exactly
/// when every derived identifier (DID, JWK `x`) would too.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    key_type: KeyType,
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// Wrap raw Ed25519 public key bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            bytes,
        }
    }

    /// Wrap a byte slice, checking the length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidLength {
                expected: PUBLIC_KEY_LENGTH,
                got: slice.len(),
            })?;
        Ok(Self::from_bytes(bytes))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// The key's cryptographic family.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Hex-encoded representation. 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(ed25519:{}…)", &self.to_hex()[..16])
    }
}
