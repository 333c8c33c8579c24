//! # ID Token Claims
//!
//! Reads the payload of a provider-issued ID token without verifying its signature.
//! The client never trusts these claims for authorization; it only uses `exp` to decide
//! whether a stored token has to be refreshed before it is presented to the provider.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Claims of interest in an ID token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdTokenClaims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Subject (provider user id)
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl IdTokenClaims {
    /// True if the token is expired at `now`, or will be within `leeway_secs`.
    pub fn is_expired_at(&self, now: i64, leeway_secs: i64) -> bool {
        self.exp <= now + leeway_secs
    }
}

/// Decode the claims segment of a JWT.
pub fn decode_claims(token: &str) -> Result<IdTokenClaims> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(Error::MalformedToken("expected three segments".to_string())),
    };

    let json = lib_utils::b64u_decode_to_string(payload)
        .map_err(|_| Error::MalformedToken("payload is not base64url".to_string()))?;

    serde_json::from_str(&json).map_err(|e| Error::MalformedToken(format!("invalid claims: {}", e)))
}

/// Whether a token should be refreshed before use. Unreadable tokens count as expired.
pub fn is_expired(token: &str, leeway_secs: i64) -> bool {
    decode_claims(token)
        .map(|claims| claims.is_expired_at(lib_utils::now_unix(), leeway_secs))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_utils::b64u_encode;

    fn token_with(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            b64u_encode(r#"{"alg":"RS256"}"#),
            b64u_encode(claims)
        )
    }

    #[test]
    fn test_decode_claims() {
        let token = token_with(r#"{"exp":1700003600,"iat":1700000000,"sub":"uid-1","email":"a@b.co"}"#);
        let claims = decode_claims(&token).expect("claims should decode");

        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email.as_deref(), Some("a@b.co"));
        assert!(!claims.is_expired_at(1_700_000_000, 60));
        assert!(claims.is_expired_at(1_700_003_590, 60));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode_claims("opaque"), Err(Error::MalformedToken(_))));
        assert!(matches!(decode_claims("a.b.c.d"), Err(Error::MalformedToken(_))));
        assert!(matches!(decode_claims(&token_with("not json")), Err(Error::MalformedToken(_))));
        assert!(is_expired("opaque", 0));
    }

    #[test]
    fn test_far_future_token_is_fresh() {
        let token = token_with(r#"{"exp":32503680000}"#);
        assert!(!is_expired(&token, 300));
    }
}
