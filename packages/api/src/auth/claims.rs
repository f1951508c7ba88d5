//! # Bearer token claims
//!
//! The backend issues HS256 JWTs whose payload carries `sub` (the username),
//! `quyen` (the role code) and `exp`. The console never verifies the
//! signature; it only peeks at the payload to pick the landing page right
//! after login. Authorization is always re-checked server-side via `/me`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::Role;

/// Payload fields the console cares about.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(rename = "quyen")]
    pub role_code: i64,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn role(&self) -> Option<Role> {
        Role::from_code(self.role_code)
    }

    /// Whether the token is past its `exp` at `now` (seconds since epoch).
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidToken(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    }
    // Some encoders keep the padding; the no-pad engine rejects it.
    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_teacher_token() {
        let token = token_with(r#"{"sub":"gv01","quyen":1,"exp":1700000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "gv01");
        assert_eq!(claims.role(), Some(Role::Teacher));
        assert!(claims.is_expired(1700000000));
        assert!(!claims.is_expired(1699999999));
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let claims = decode_claims(&token_with(r#"{"sub":"admin","quyen":0}"#)).unwrap();
        assert_eq!(claims.role(), Some(Role::Admin));
        assert!(!claims.is_expired(i64::MAX));
    }

    #[test]
    fn test_wrong_segment_count() {
        let err = decode_claims("not-a-jwt").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken(_)));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_garbage_payload() {
        assert!(decode_claims("a.!!!.c").is_err());
        assert!(decode_claims(&token_with("[1,2]")).is_err());
    }

    #[test]
    fn test_unknown_role_code_decodes() {
        let claims = decode_claims(&token_with(r#"{"sub":"x","quyen":7}"#)).unwrap();
        assert!(claims.role().is_none());
    }
}
