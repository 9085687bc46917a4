//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::User;

pub const DEFAULT_ISSUER: &str = "hotel-reservation";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn for_user(user: &User, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

pub fn create_token(user: &User, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::for_user(user, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and issuer, then return the claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.leeway = 0;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn user() -> User {
        User::new("James", "Foo", "james@foo.com", "hash", UserRole::Customer)
    }

    #[test]
    fn token_roundtrip_carries_user_claims() {
        let config = JwtConfig::new("test-secret", 4);
        let u = user();
        let token = create_token(&u, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.email, "james@foo.com");
        assert_eq!(claims.role, "customer");
        assert_eq!(claims.exp - claims.iat, 4 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(&user(), &JwtConfig::new("one", 4)).unwrap();
        assert!(verify_token(&token, &JwtConfig::new("two", 4)).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = JwtConfig::new("test-secret", -1);
        let token = create_token(&user(), &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let mut other = JwtConfig::new("test-secret", 4);
        other.issuer = "someone-else".into();
        let token = create_token(&user(), &other).unwrap();
        assert!(verify_token(&token, &JwtConfig::new("test-secret", 4)).is_err());
    }
}
