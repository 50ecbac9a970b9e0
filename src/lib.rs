// Copyright (c) 2026 Sigil Contributors. MIT License.
// See LICENSE for details.

//! # Sigil — Signed Identity Tokens
//!
//! Sigil issues compact, three-part, JWS-style bearer tokens that prove
//! control of an Ed25519 keypair to a remote service. You hand it a
//! [`Signer`] — anything that can resolve a public key and sign bytes for
//! an identity — and it hands back `header.payload.signature`, ready to
//! drop into an `Authorization: Bearer` header.
//!
//! That's the whole crate. No verification, no key storage, no network.
//! The interesting parts are the ones that have to be exactly right:
//!
//! - **encoding** — Unpadded base64url, the JWS way.
//! - **key** — The issuer's narrow view of public key material.
//! - **did** — Deterministic `did:key` derivation (multicodec + base58btc).
//! - **signer** — The two-method capability the issuer consumes, plus an
//!   in-memory implementation for tests.
//! - **claims** — Payload claims and issuance options.
//! - **token** — Assembly and signing of the token itself.
//! - **config** — Every wire-visible constant, in one place.
//!
//! ## Example
//!
//! ```
//! use sigil::{issue, InMemorySigner, TokenOptions};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let signer = InMemorySigner::new();
//! signer.create_key("account.testnet", "testnet");
//!
//! let token = issue(
//!     &signer,
//!     TokenOptions::new()
//!         .account_id("account.testnet")
//!         .network_id("testnet")
//!         .claim("aud", "broker.testnet"),
//! )
//! .await?;
//!
//! // Three dot-joined base64url segments.
//! assert_eq!(token.as_str().matches('.').count(), 2);
//! # Ok::<(), sigil::TokenError>(())
//! # }).unwrap();
//! ```
//!
//! ## Design Notes
//!
//! 1. The `alg` label `EdDSASha256` is project-specific, not a registered
//!    JOSE name. It is preserved verbatim for wire compatibility.
//! 2. Callers are trusted: extra claims override computed defaults
//!    (`exp` included) without bounds checking. The issuer warns via
//!    `tracing` and otherwise stays out of the way.
//! 3. JSON serializes in construction order; no canonicalization. Byte
//!    reproducibility is guaranteed within this implementation only.

pub mod claims;
pub mod config;
pub mod did;
pub mod encoding;
pub mod error;
pub mod key;
pub mod signer;
pub mod token;

pub use claims::{ClaimValue, TokenOptions};
pub use did::did_key;
pub use error::TokenError;
pub use key::{KeyError, KeyType, PublicKey, PUBLIC_KEY_LENGTH};
pub use signer::{InMemorySigner, Signer, SignerError};
pub use token::{issue, Header, Jwk, Token};
