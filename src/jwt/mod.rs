//! JWT token handling
//!
//! Stateless bearer tokens: issuance is unconditional for a well-formed
//! claim, verification is a pure function of the token and the server-held
//! secret. No directory lookup happens on either path.

use crate::config::JwtConfig;
use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity claims embedded in a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email is the sole correlation key to the user directory and all
    /// per-user data
    pub email: String,
    /// Caller-supplied attributes carried through opaquely
    #[serde(flatten)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<HashMap<String, serde_json::Value>>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60 seconds, so tokens expire promptly while still tolerating
    /// minor clock skew.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.leeway = 5;
        v
    }

    /// Issue a signed, time-bounded token for the given identity
    pub fn issue(
        &self,
        email: &str,
        extra: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_ttl_secs);

        let claims = Claims {
            email: email.to_string(),
            extra,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = self.strict_validation();
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    pub fn token_ttl(&self) -> i64 {
        self.config.token_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing-purposes-only".to_string(),
            token_ttl_secs: 604_800,
        }
    }

    #[test]
    fn test_issue_and_verify_preserves_email() {
        let manager = JwtManager::new(test_config());

        let token = manager.issue("test@example.com", None).unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_issue_carries_extra_attributes() {
        let manager = JwtManager::new(test_config());
        let mut extra = HashMap::new();
        extra.insert("name".to_string(), serde_json::json!("Test User"));

        let token = manager.issue("test@example.com", Some(extra)).unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(
            claims.extra.unwrap().get("name"),
            Some(&serde_json::json!("Test User"))
        );
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let manager = JwtManager::new(test_config());
        assert!(manager.verify("not-a-token").is_err());
        assert!(manager.verify("").is_err());
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let manager = JwtManager::new(test_config());
        let token = manager.issue("test@example.com", None).unwrap();

        // Flip a character in the signature segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", flipped, &sig[1..]);

        assert!(manager.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let manager = JwtManager::new(test_config());
        let other = JwtManager::new(JwtConfig {
            secret: "a-different-secret".to_string(),
            token_ttl_secs: 604_800,
        });

        let token = manager.issue("test@example.com", None).unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // A negative TTL yields a token that is already past expiry plus the
        // 5 second leeway.
        let manager = JwtManager::new(JwtConfig {
            secret: "test-secret".to_string(),
            token_ttl_secs: -60,
        });

        let token = manager.issue("test@example.com", None).unwrap();
        let err = manager.verify(&token).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Jwt(_)));
    }

    #[test]
    fn test_token_has_valid_structure() {
        let manager = JwtManager::new(test_config());
        let token = manager.issue("test@example.com", None).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        for part in parts {
            assert!(!part.is_empty());
        }
    }

    #[test]
    fn test_manager_clone_verifies_same_tokens() {
        let manager1 = JwtManager::new(test_config());
        let manager2 = manager1.clone();

        let token = manager1.issue("test@example.com", None).unwrap();
        let claims = manager2.verify(&token).unwrap();
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_claims_serialization_flattens_extra() {
        let mut extra = HashMap::new();
        extra.insert("photo".to_string(), serde_json::json!("u.png"));
        let claims = Claims {
            email: "a@x.com".to_string(),
            extra: Some(extra),
            iat: 1_000_000,
            exp: 1_604_800,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["photo"], "u.png");
    }
}
