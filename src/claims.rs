//! # Claims & Token Options
//!
//! Everything the caller hands the issuer: which identity to sign as, how
//! long the token should live, and any extra payload claims.
//!
//! Claim values are strings or numbers, full stop. If you feel the urge to
//! nest an object in there, the relying party on the other end almost
//! certainly does not expect it, and neither does this type.
//!
//! Extra claims merge over the computed defaults last-write-wins, exactly
//! like a JS object spread would: overriding an existing claim keeps its
//! position in the payload, new claims append at the end, and a claim set
//! to [`unset`](TokenOptions::unset_claim) is dropped from the JSON
//! entirely rather than serialized as `null`.

use serde_json::Value;

/// A single payload claim value: a string or a JSON number.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    /// A string claim, e.g. `aud`.
    Text(String),
    /// An integer claim, e.g. `exp`.
    Int(i64),
    /// A floating-point claim. Non-finite values are not representable in
    /// JSON and make issuance fail with an encoding error.
    Float(f64),
}

impl ClaimValue {
    /// Convert to a JSON value, or `None` if the value has no JSON form
    /// (a non-finite float).
    pub(crate) fn to_json(&self) -> Option<Value> {
        match self {
            ClaimValue::Text(s) => Some(Value::String(s.clone())),
            ClaimValue::Int(i) => Some(Value::Number((*i).into())),
            ClaimValue::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::Text(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Int(value)
    }
}

impl From<i32> for ClaimValue {
    fn from(value: i32) -> Self {
        ClaimValue::Int(value.into())
    }
}

impl From<u32> for ClaimValue {
    fn from(value: u32) -> Self {
        ClaimValue::Int(value.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

/// An entry in the extra-claims list: either a value to merge in, or an
/// instruction to drop the claim from the payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Claim {
    Set(ClaimValue),
    Unset,
}

/// Options for issuing a token.
///
/// `account_id` and `network_id` are optional at the type level but
/// required in practice: leaving them unset is passed straight through to
/// the signer, which is expected to fail the lookup. The issuer does not
/// second-guess the caller here.
///
/// # Examples
///
/// ```
/// use sigil::TokenOptions;
///
/// let options = TokenOptions::new()
///     .account_id("account.testnet")
///     .network_id("testnet")
///     .claim("aud", "broker.testnet");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub(crate) account_id: Option<String>,
    pub(crate) network_id: Option<String>,
    pub(crate) offset: Option<i64>,
    pub(crate) claims: Vec<(String, Claim)>,
}

impl TokenOptions {
    /// Empty options. The signer will reject the absent identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// The account to issue as. Becomes the `iss` claim.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// The network whose keys the signer should use.
    pub fn network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    /// Validity window in seconds, replacing the 10-minute default.
    ///
    /// This moves `exp` relative to issuance time; an explicit `exp` extra
    /// claim still wins over both.
    pub fn offset(mut self, seconds: i64) -> Self {
        self.offset = Some(seconds);
        self
    }

    /// Add an extra payload claim.
    ///
    /// Later entries win over earlier ones and over the computed defaults,
    /// including `exp`, `iss` and `sub`. Nothing is bounds-checked; the
    /// issuer trusts its caller.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.push((name.into(), Claim::Set(value.into())));
        self
    }

    /// Drop a claim from the payload, even a computed default.
    ///
    /// The claim is omitted from the serialized JSON entirely — it does not
    /// appear as `null`.
    pub fn unset_claim(mut self, name: impl Into<String>) -> Self {
        self.claims.push((name.into(), Claim::Unset));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_cover_strings_and_numbers() {
        assert_eq!(ClaimValue::from("x"), ClaimValue::Text("x".into()));
        assert_eq!(ClaimValue::from(String::from("y")), ClaimValue::Text("y".into()));
        assert_eq!(ClaimValue::from(42i64), ClaimValue::Int(42));
        assert_eq!(ClaimValue::from(-7i32), ClaimValue::Int(-7));
        assert_eq!(ClaimValue::from(7u32), ClaimValue::Int(7));
        assert_eq!(ClaimValue::from(1.5f64), ClaimValue::Float(1.5));
    }

    #[test]
    fn non_finite_floats_have_no_json_form() {
        assert!(ClaimValue::Float(f64::NAN).to_json().is_none());
        assert!(ClaimValue::Float(f64::INFINITY).to_json().is_none());
        assert!(ClaimValue::Float(1.25).to_json().is_some());
    }

    #[test]
    fn builder_preserves_claim_order() {
        let options = TokenOptions::new()
            .claim("aud", "broker.testnet")
            .claim("tag", 3i64)
            .unset_claim("nbf");
        let names: Vec<&str> = options.claims.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["aud", "tag", "nbf"]);
        assert!(matches!(options.claims[2].1, Claim::Unset));
    }

    #[test]
    fn identity_fields_default_to_absent() {
        let options = TokenOptions::new();
        assert!(options.account_id.is_none());
        assert!(options.network_id.is_none());
        assert!(options.offset.is_none());
    }
}
