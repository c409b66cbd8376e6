// JWT verification for the gateway (HS256, sub + role claims)

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// "user" or "admin"
    pub role: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

/// Role required by the event administration endpoints.
pub const ROLE_ADMIN: &str = "admin";

/// Validates bearer tokens against the shared secret.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Returns the claims of a valid, unexpired token
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).ok()?;
        if data.claims.sub.trim().is_empty() || data.claims.role.trim().is_empty() {
            return None;
        }
        Some(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(secret: &str, sub: &str, role: &str) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let token = mint("secret", "user-1", "user");
        let verifier = TokenVerifier::new("secret");
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = mint("secret", "user-1", "user");
        let verifier = TokenVerifier::new("other-secret");
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "user".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify("not-a-token").is_none());
    }

    #[test]
    fn test_blank_subject_is_rejected() {
        let token = mint("secret", "  ", "user");
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify(&token).is_none());
    }
}
