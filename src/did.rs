//! # DID Derivation
//!
//! Maps a public key to a `did:key` decentralized identifier — the
//! self-certifying name that appears as the `sub` claim of every token.
//!
//! ## Format
//!
//! ```text
//! did:key:z<base58btc(0xed 0x01 || pubkey_bytes)>
//! ```
//!
//! The two-byte multicodec tag marks "Ed25519 public key"; the `z` prefix
//! is multibase for "what follows is base58btc". The derivation is a pure
//! function of the key bytes: same key, same DID, every time, on every
//! machine. There is no registry to consult and nothing to look up — the
//! identifier *is* the key.
//!
//! ## Standards References
//!
//! - [did:key method](https://w3c-ccg.github.io/did-method-key/)
//! - [multicodec table](https://github.com/multiformats/multicodec)
//! - [multibase](https://github.com/multiformats/multibase)

use crate::config;
use crate::key::PublicKey;

/// Derive the `did:key` identifier for a public key.
///
/// # Examples
///
/// ```
/// use sigil::{did_key, PublicKey};
///
/// let pk = PublicKey::from_bytes([7u8; 32]);
/// let did = did_key(&pk);
/// assert!(did.starts_with("did:key:z"));
/// assert_eq!(did, did_key(&pk));
/// ```
pub fn did_key(public_key: &PublicKey) -> String {
    let prefix = public_key.key_type().multicodec_prefix();
    let mut tagged = Vec::with_capacity(prefix.len() + public_key.as_bytes().len());
    tagged.extend_from_slice(&prefix);
    tagged.extend_from_slice(public_key.as_bytes());
    format!(
        "{}{}{}",
        config::DID_KEY_PREFIX,
        config::MULTIBASE_BASE58BTC,
        bs58::encode(tagged).into_string()
    )
}
