use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::auth::AuthUser;
use crate::common::UserId;

/// JWT Claims - data stored in the session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (user_id as string)
    pub user_id: Uuid,   // Staff user UUID
    pub email: String,   // Staff email (for logging)
    pub is_admin: bool,  // Dashboard write access
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: String,     // Unique token identifier
}

impl Claims {
    pub fn into_auth_user(self) -> AuthUser {
        AuthUser {
            user_id: UserId::from_uuid(self.user_id),
            email: self.email,
            is_admin: self.is_admin,
        }
    }
}

/// JWT Service - creates and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a session token; expires after 12 hours (one working day).
    pub fn create_token(&self, user_id: Uuid, email: String, is_admin: bool) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + chrono::Duration::hours(12);

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email,
            is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::now_v7().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify signature, expiry and issuer
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
        let service = JwtService::new("test_secret_key", "agency-test".to_string());
        let user_id = Uuid::now_v7();

        let token = service
            .create_token(user_id, "ana@agency.test".to_string(), true)
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "ana@agency.test");
        assert!(claims.is_admin);
        assert_eq!(claims.iss, "agency-test");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret1", "agency-test".to_string());
        let verifier = JwtService::new("secret2", "agency-test".to_string());

        let token = issuer
            .create_token(Uuid::now_v7(), "ana@agency.test".to_string(), false)
            .unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuer = JwtService::new("secret", "someone-else".to_string());
        let verifier = JwtService::new("secret", "agency-test".to_string());

        let token = issuer
            .create_token(Uuid::now_v7(), "ana@agency.test".to_string(), true)
            .unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_claims_become_auth_user() {
        let service = JwtService::new("secret", "agency-test".to_string());
        let user_id = Uuid::now_v7();
        let token = service
            .create_token(user_id, "luis@agency.test".to_string(), false)
            .unwrap();

        let user = service.verify_token(&token).unwrap().into_auth_user();
        assert_eq!(user.user_id, UserId::from_uuid(user_id));
        assert!(!user.is_admin);
    }
}
