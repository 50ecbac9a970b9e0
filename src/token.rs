//! # Token Issuance
//!
//! The algorithmic heart of the crate: compose a canonical header and
//! payload, serialize each to compact JSON, base64url-encode both, sign
//! the dot-joined pair, and emit `header.payload.signature`.
//!
//! ## Wire Format
//!
//! ```text
//! base64url(JSON(header)) "." base64url(JSON(payload)) "." base64url(signature)
//! ```
//!
//! All three segments use the unpadded URL-safe alphabet. The signature
//! covers the UTF-8 bytes of the first two segments joined by a dot,
//! standard JWS signing input.
//!
//! ## Determinism
//!
//! JSON fields serialize in construction order; no canonicalization (JCS
//! or otherwise) is applied. Within this implementation the byte layout is
//! fully deterministic: two calls with the same key, claims, and clock
//! second produce identical tokens. A second implementation with a
//! different map order could still byte-differ on semantically equal claims.
//! Relying parties must verify, not compare.
//!
//! ## Trust Model
//!
//! Callers are trusted. Extra claims overwrite computed defaults
//! last-write-wins, `exp` included, with no bounds checking: a caller can
//! mint a token that expired before it was issued, and the tests pin that
//! behavior. The issuer logs a warning when it happens; it does not argue.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

use crate::claims::{Claim, TokenOptions};
use crate::config;
use crate::did;
use crate::encoding;
use crate::error::TokenError;
use crate::key::PublicKey;
use crate::signer::Signer;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The JWK embedded in every token header (RFC 7515 §4.1.3).
///
/// Carries the resolved public key so a relying party can verify the token
/// without any out-of-band key lookup. Field declaration order is
/// serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type: always `"OKP"`.
    pub kty: String,
    /// Curve: always `"Ed25519"`.
    pub crv: String,
    /// The raw public key, base64url-encoded without padding.
    pub x: String,
    /// Key use: always `"sig"`.
    #[serde(rename = "use")]
    pub use_: String,
}

/// The token header: algorithm label, token type, and the signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm label. A project-specific string, not a JOSE name.
    pub alg: String,
    /// Token type, always `"JWT"`.
    pub typ: String,
    /// The public key this token is verifiable against.
    pub jwk: Jwk,
}

impl Header {
    /// Build the canonical header for a resolved public key.
    pub fn for_key(public_key: &PublicKey) -> Self {
        Self {
            alg: config::TOKEN_ALG.to_owned(),
            typ: config::TOKEN_TYP.to_owned(),
            jwk: Jwk {
                kty: config::JWK_KTY.to_owned(),
                crv: config::JWK_CRV.to_owned(),
                x: encoding::base64url(public_key.as_bytes()),
                use_: config::JWK_USE.to_owned(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// An issued bearer token: three base64url segments joined by dots.
///
/// Immutable and ownerless — a pure value. This crate only issues;
/// parsing and verification belong to the relying party.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// The token as a string slice, ready for an `Authorization: Bearer`
    /// header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, yielding the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Issuance
// ---------------------------------------------------------------------------

/// Issue a signed identity token.
///
/// Resolves the public key for the identity in `options`, assembles the
/// header and payload, and signs the encoded pair — two sequential signer
/// calls, one token out. Any signer failure propagates immediately; there
/// is no retry and no partial token, since assembly is the final step.
///
/// Dropping the returned future cancels the in-flight signer call.
///
/// # Errors
///
/// - [`TokenError::IdentityResolution`] — the signer has no public key for
///   the identity.
/// - [`TokenError::Signing`] — the signer refused to sign the message.
/// - [`TokenError::Encoding`] — a claim value has no JSON representation.
///
/// # Examples
///
/// ```
/// use sigil::{issue, InMemorySigner, TokenOptions};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let signer = InMemorySigner::new();
/// signer.create_key("account.testnet", "testnet");
///
/// let token = issue(
///     &signer,
///     TokenOptions::new()
///         .account_id("account.testnet")
///         .network_id("testnet")
///         .claim("aud", "broker.testnet"),
/// )
/// .await
/// .unwrap();
/// assert_eq!(token.as_str().matches('.').count(), 2);
/// # });
/// ```
pub async fn issue<S>(signer: &S, options: TokenOptions) -> Result<Token, TokenError>
where
    S: Signer + ?Sized,
{
    let TokenOptions {
        account_id,
        network_id,
        offset,
        claims,
    } = options;

    debug!(?account_id, ?network_id, "issuing identity token");

    let public_key = signer
        .get_public_key(account_id.as_deref(), network_id.as_deref())
        .await
        .map_err(|source| TokenError::IdentityResolution {
            account_id: account_id.clone(),
            network_id: network_id.clone(),
            source,
        })?;

    let header = Header::for_key(&public_key);

    let now = Utc::now().timestamp();
    let exp = now + offset.unwrap_or(config::DEFAULT_TOKEN_TTL_SECS);

    // Defaults first, in fixed order; extras merge over them afterwards.
    // Overriding an existing claim keeps its position, new claims append.
    let mut payload = Map::new();
    if let Some(account) = &account_id {
        payload.insert("iss".to_owned(), Value::String(account.clone()));
    }
    payload.insert("sub".to_owned(), Value::String(did::did_key(&public_key)));
    payload.insert("nbf".to_owned(), Value::Number(now.into()));
    payload.insert("iat".to_owned(), Value::Number(now.into()));
    payload.insert("exp".to_owned(), Value::Number(exp.into()));

    for (name, claim) in claims {
        if config::COMPUTED_CLAIMS.contains(&name.as_str()) {
            warn!(claim = %name, "extra claim replaces or removes a computed default");
        }
        match claim {
            Claim::Set(value) => {
                let json = value.to_json().ok_or_else(|| {
                    TokenError::Encoding(format!("claim '{name}' is not representable in JSON"))
                })?;
                payload.insert(name, json);
            }
            Claim::Unset => {
                // Dropped entirely; an unset claim never serializes as null.
                payload.shift_remove(&name);
            }
        }
    }

    let header_json =
        serde_json::to_string(&header).map_err(|e| TokenError::Encoding(e.to_string()))?;
    let payload_json = serde_json::to_string(&Value::Object(payload))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        encoding::base64url(header_json.as_bytes()),
        encoding::base64url(payload_json.as_bytes())
    );

    let signature = signer
        .sign_message(
            signing_input.as_bytes(),
            account_id.as_deref(),
            network_id.as_deref(),
        )
        .await
        .map_err(TokenError::Signing)?;

    debug!(?account_id, "issued identity token");

    Ok(Token(format!(
        "{signing_input}.{}",
        encoding::base64url(&signature)
    )))
}
