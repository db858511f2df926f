/// Authentication service - client-held JWT access tokens
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use portal_core::PublicAccount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account ID)
    pub name: String,
    pub email: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
        }
    }

    /// Create an access token carrying the account's public fields
    pub fn create_access_token(&self, account: &PublicAccount) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.access_token_expiration;

        let claims = Claims {
            sub: account.id.to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify an access token and recover the account it was issued for
    pub fn verify_access_token(&self, token: &str) -> Result<PublicAccount> {
        let claims = self.verify_token(token)?;
        let id = claims
            .sub
            .parse()
            .map_err(|_| ServerError::Auth("Invalid token subject".to_string()))?;

        Ok(PublicAccount {
            id,
            name: claims.name,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> PublicAccount {
        PublicAccount {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_token_creation_and_verification() {
        let auth = AuthService::new("secret".to_string(), 24);

        let token = auth.create_access_token(&alice()).unwrap();
        let account = auth.verify_access_token(&token).unwrap();
        assert_eq!(account, alice());
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        let other = AuthService::new("different-secret".to_string(), 24);

        let token = other.create_access_token(&alice()).unwrap();
        assert!(auth.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_malformed_and_empty_tokens_are_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);

        assert!(auth.verify_access_token("not.a.valid.jwt.token").is_err());
        assert!(auth.verify_access_token("").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        let now = Utc::now().timestamp();

        // Well past the default 60s leeway
        let claims = Claims {
            sub: "1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(auth.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_is_rejected() {
        let auth = AuthService::new("secret".to_string(), 24);
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: "user-123".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            auth.verify_access_token(&token),
            Err(ServerError::Auth(_))
        ));
    }
}
