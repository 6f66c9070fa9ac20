use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (admin email)
    pub email: String, // Admin email (for logging/debugging)
    pub is_admin: bool,
    pub exp: i64, // Expiration timestamp
    pub iat: i64, // Issued at timestamp
    pub iss: String,
    pub jti: String, // Unique token identifier
}

/// JWT Service - creates and verifies back-office tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: chrono::Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer (tokens live 24 hours)
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl: chrono::Duration::hours(24),
        }
    }

    /// Override the token lifetime (service tokens for the admin web live longer)
    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Create a new JWT token for an operator
    pub fn create_token(&self, email: &str, is_admin: bool) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: email.to_string(),
            email: email.to_string(),
            is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid, unexpired and from our issuer
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());

        let token = service.create_token("admin@example.com", true).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.sub, "admin@example.com");
        assert!(claims.is_admin);
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let token = service1.create_token("admin@example.com", true).unwrap();

        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer() {
        let service1 = JwtService::new("secret", "issuer-a".to_string());
        let service2 = JwtService::new("secret", "issuer-b".to_string());

        let token = service1.create_token("admin@example.com", true).unwrap();

        assert!(service2.verify_token(&token).is_err());
    }

    #[test]
    fn test_custom_ttl() {
        let service = JwtService::new("secret", "issuer".to_string())
            .with_ttl(chrono::Duration::days(30));

        let token = service.create_token("admin@example.com", true).unwrap();
        let claims = service.verify_token(&token).unwrap();

        let expires_in = claims.exp - chrono::Utc::now().timestamp();
        assert!(expires_in > 29 * 24 * 3600);
        assert!(expires_in <= 30 * 24 * 3600);
    }
}
