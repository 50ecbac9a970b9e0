//! Error types for token issuance.
//!
//! Every way `issue` can fail returns a [`TokenError`]. There are exactly
//! three, matching the three things that can actually go wrong: the signer
//! can't find the key, the signer won't sign, or a claim can't be turned
//! into JSON. No retries happen behind any of them — issuance is a single
//! attempt, and resilience is the caller's department.

use thiserror::Error;

use crate::signer::SignerError;

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signer could not produce a public key for the identity
    /// (unknown account, locked key store, absent identifiers).
    #[error("cannot resolve a public key for account={account_id:?} network={network_id:?}")]
    IdentityResolution {
        /// The account the caller asked for, if any.
        account_id: Option<String>,
        /// The network the caller asked for, if any.
        network_id: Option<String>,
        /// What the signer said.
        #[source]
        source: SignerError,
    },

    /// The signer rejected the signing request for the already-resolved
    /// identity.
    #[error("signer rejected the message")]
    Signing(#[source] SignerError),

    /// A claim value could not be serialized to JSON. Failing here beats
    /// emitting a malformed token.
    #[error("encoding error: {0}")]
    Encoding(String),
}
