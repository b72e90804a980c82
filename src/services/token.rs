//! JWT issuance and verification (HS256).

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::entities::users;

/// Identity claims embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Produces a signed, time-bound token for an authenticated user.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &users::Model) -> Result<String>;
}

pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    #[must_use]
    pub const fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Validates a token's signature, expiry, issuer and audience, returning
    /// the embedded claims. Used by the request authorization middleware.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .context("Token validation failed")?;

        Ok(data.claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user: &users::Model) -> Result<String> {
        let now = Utc::now();
        let expires = now + Duration::hours(self.config.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .context("Failed to sign token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user() -> users::Model {
        let now = Utc::now();
        users::Model {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_verifies_and_carries_identity() {
        let issuer = JwtTokenIssuer::new(JwtConfig::default());
        let user = test_user();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = JwtTokenIssuer::new(JwtConfig::default());
        let token = issuer.issue(&test_user()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(issuer.verify(&tampered).is_err());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtTokenIssuer::new(JwtConfig::default());
        let other = JwtTokenIssuer::new(JwtConfig {
            secret: "another-secret-that-is-long-enough-000".to_string(),
            ..JwtConfig::default()
        });

        let token = other.issue(&test_user()).unwrap();
        assert!(issuer.verify(&token).is_err());
    }
}
