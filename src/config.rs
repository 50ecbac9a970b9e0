//! # Token Constants
//!
//! Every magic number in sigil lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong.
//!
//! Most of these values are wire-visible: relying parties compare them
//! byte-for-byte when they inspect a token. Changing any of them breaks
//! every verifier in the field, so don't.

// ---------------------------------------------------------------------------
// Token Lifetime
// ---------------------------------------------------------------------------

/// Default validity window for an issued token, in seconds.
///
/// Ten minutes: long enough to survive a slow upload handshake, short
/// enough that a leaked token goes stale before anyone gets creative
/// with it. Callers can widen or shrink this per token via
/// [`TokenOptions::offset`](crate::TokenOptions::offset).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 600;

// ---------------------------------------------------------------------------
// Header Literals
// ---------------------------------------------------------------------------

/// The `alg` value stamped into every token header.
///
/// This is a project-specific label for "Ed25519 over the SHA-256 flavored
/// signing flow", not a registered JOSE algorithm name. Verifiers on the
/// other end match it verbatim, so it stays exactly this string even though
/// the IANA registry has never heard of it.
pub const TOKEN_ALG: &str = "EdDSASha256";

/// The `typ` value stamped into every token header.
pub const TOKEN_TYP: &str = "JWT";

/// JWK key type for Octet Key Pairs (RFC 8037).
pub const JWK_KTY: &str = "OKP";

/// JWK curve name for Ed25519 keys.
pub const JWK_CRV: &str = "Ed25519";

/// JWK public key use: signing.
pub const JWK_USE: &str = "sig";

// ---------------------------------------------------------------------------
// Identifier Derivation
// ---------------------------------------------------------------------------

/// Multicodec tag for an Ed25519 public key: varint(0xed) == `0xed 0x01`.
///
/// The two bytes are prepended to the raw key before base58btc encoding.
/// Any other key type needs a different tag and is currently unsupported.
pub const ED25519_MULTICODEC_PREFIX: [u8; 2] = [0xed, 0x01];

/// DID method prefix for key-derived identifiers.
pub const DID_KEY_PREFIX: &str = "did:key:";

/// Multibase prefix marking base58btc encoding.
pub const MULTIBASE_BASE58BTC: char = 'z';

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// Payload claims the issuer computes itself.
///
/// Extra claims may still override any of these (callers are trusted), but
/// the issuer logs a warning when they do, because overriding `exp` or `sub`
/// is usually a test fixture and occasionally a mistake.
pub const COMPUTED_CLAIMS: [&str; 5] = ["iss", "sub", "nbf", "iat", "exp"];
