//! # The Signer Capability
//!
//! The one external dependency the issuer has: something that holds keys
//! and can (a) tell us the public key for an identity and (b) sign bytes
//! as that identity. Software key store, hardware token, remote KMS — the
//! issuer does not know and does not care. If it can answer these two
//! questions, it can back a token.
//!
//! Both methods are async because real signers suspend: a hardware key
//! waits for a button press, a KMS waits for a network round-trip. The
//! issuer awaits them sequentially (the signature covers bytes derived
//! from the public key, so there is nothing to parallelize).
//!
//! [`InMemorySigner`] is the software implementation used by this crate's
//! own tests and benches, and exported for downstream test suites. It is
//! not a vault. Do not ship production keys in it.

use std::collections::HashMap;

use async_trait::async_trait;
use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use parking_lot::RwLock;
use rand::rngs::OsRng;
use thiserror::Error;

use crate::key::PublicKey;

/// Errors a signer can surface.
///
/// These are intentionally coarse. A locked hardware token and a KMS
/// timeout both mean "you are not getting a signature right now", and the
/// issuer's response is the same either way: give up and tell the caller.
#[derive(Debug, Error)]
pub enum SignerError {
    /// No key material exists for the requested identity.
    #[error("unknown identity: account={account_id:?} network={network_id:?}")]
    UnknownIdentity {
        /// The account that was requested, if any.
        account_id: Option<String>,
        /// The network that was requested, if any.
        network_id: Option<String>,
    },

    /// Key material exists but is not currently usable for signing.
    #[error("key for account '{0}' is locked")]
    KeyLocked(String),

    /// The backing store failed in some backend-specific way.
    #[error("signer backend error: {0}")]
    Backend(String),
}

/// The capability the token issuer consumes.
///
/// Implementations must be safe for concurrent use if callers issue tokens
/// concurrently; the issuer itself holds no locks and imposes none.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Resolve the public key for an identity.
    ///
    /// Fails when the identity is unknown or the key store cannot produce
    /// key material for it (absent identifiers are a caller error that
    /// surfaces here, not before).
    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, SignerError>;

    /// Sign an arbitrary byte message as an identity.
    ///
    /// Returns the raw signature bytes. Fails when the identity cannot
    /// sign, e.g. the key is not unlocked.
    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<Vec<u8>, SignerError>;
}

/// A software signer holding Ed25519 keys in memory, keyed by
/// `(account_id, network_id)`.
///
/// Exists so tests and benches have a signer that always answers. Keys
/// live in a plain `HashMap` behind a `RwLock` and vanish with the
/// process.
#[derive(Default)]
pub struct InMemorySigner {
    keys: RwLock<HashMap<(String, String), SigningKey>>,
}

impl InMemorySigner {
    /// An empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh Ed25519 key for an identity and return its public
    /// half. Replaces any existing key for the same identity.
    pub fn create_key(&self, account_id: &str, network_id: &str) -> PublicKey {
        let signing_key = SigningKey::generate(&mut OsRng);
        self.insert(account_id, network_id, signing_key)
    }

    /// Install a key derived deterministically from a 32-byte seed.
    ///
    /// Handy for golden tests: same seed, same key, same token bytes.
    pub fn create_key_from_seed(
        &self,
        account_id: &str,
        network_id: &str,
        seed: &[u8; 32],
    ) -> PublicKey {
        self.insert(account_id, network_id, SigningKey::from_bytes(seed))
    }

    fn insert(&self, account_id: &str, network_id: &str, signing_key: SigningKey) -> PublicKey {
        let public_key = PublicKey::from_bytes(signing_key.verifying_key().to_bytes());
        self.keys
            .write()
            .insert((account_id.to_owned(), network_id.to_owned()), signing_key);
        public_key
    }

    /// Look up the signing key for an identity, surfacing absent
    /// identifiers as `UnknownIdentity` like any other miss.
    fn lookup(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<SigningKey, SignerError> {
        let unknown = || SignerError::UnknownIdentity {
            account_id: account_id.map(str::to_owned),
            network_id: network_id.map(str::to_owned),
        };
        let (account, network) = account_id.zip(network_id).ok_or_else(unknown)?;
        self.keys
            .read()
            .get(&(account.to_owned(), network.to_owned()))
            .cloned()
            .ok_or_else(unknown)
    }
}

#[async_trait]
impl Signer for InMemorySigner {
    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, SignerError> {
        let signing_key = self.lookup(account_id, network_id)?;
        Ok(PublicKey::from_bytes(signing_key.verifying_key().to_bytes()))
    }

    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<Vec<u8>, SignerError> {
        let signing_key = self.lookup(account_id, network_id)?;
        Ok(signing_key.sign(message).to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    const ACCOUNT: &str = "account.testnet";
    const NETWORK: &str = "testnet";

    #[tokio::test]
    async fn created_key_resolves() {
        let signer = InMemorySigner::new();
        let created = signer.create_key(ACCOUNT, NETWORK);
        let resolved = signer
            .get_public_key(Some(ACCOUNT), Some(NETWORK))
            .await
            .unwrap();
        assert_eq!(created, resolved);
    }

    #[tokio::test]
    async fn unknown_identity_fails_resolution() {
        let signer = InMemorySigner::new();
        signer.create_key(ACCOUNT, NETWORK);
        let result = signer
            .get_public_key(Some("missing.testnet"), Some(NETWORK))
            .await;
        assert!(matches!(
            result,
            Err(SignerError::UnknownIdentity { account_id: Some(a), .. }) if a == "missing.testnet"
        ));
    }

    #[tokio::test]
    async fn absent_identity_fails_resolution() {
        let signer = InMemorySigner::new();
        signer.create_key(ACCOUNT, NETWORK);
        assert!(signer.get_public_key(None, None).await.is_err());
        assert!(signer.get_public_key(Some(ACCOUNT), None).await.is_err());
        assert!(signer.sign_message(b"m", None, Some(NETWORK)).await.is_err());
    }

    #[tokio::test]
    async fn signatures_verify_against_resolved_key() {
        let signer = InMemorySigner::new();
        let public_key = signer.create_key(ACCOUNT, NETWORK);
        let message = b"header.payload";
        let signature = signer
            .sign_message(message, Some(ACCOUNT), Some(NETWORK))
            .await
            .unwrap();

        let verifying_key = VerifyingKey::from_bytes(public_key.as_bytes()).unwrap();
        let signature = Signature::from_slice(&signature).unwrap();
        assert!(verifying_key.verify(message, &signature).is_ok());
    }

    #[tokio::test]
    async fn seeded_keys_are_deterministic() {
        let seed = [17u8; 32];
        let a = InMemorySigner::new().create_key_from_seed(ACCOUNT, NETWORK, &seed);
        let b = InMemorySigner::new().create_key_from_seed(ACCOUNT, NETWORK, &seed);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn identities_are_isolated() {
        let signer = InMemorySigner::new();
        let first = signer.create_key("alice.testnet", NETWORK);
        let second = signer.create_key("bob.testnet", NETWORK);
        assert_ne!(first, second);

        let resolved = signer
            .get_public_key(Some("alice.testnet"), Some(NETWORK))
            .await
            .unwrap();
        assert_eq!(resolved, first);
    }
}
