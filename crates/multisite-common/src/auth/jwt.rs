//! JWT utilities for admin sessions
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Login session this token belongs to
    pub session_id: String,
}

impl Claims {
    /// Get the admin ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn admin_id(&self) -> Result<Uuid, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Token handed to an admin after login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip)]
    pub session_id: String,
}

/// JWT service for encoding and decoding session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Issue a token for a fresh login session
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, admin_id: Uuid) -> Result<SessionToken, AppError> {
        self.issue_with_session(admin_id, Uuid::new_v4().to_string())
    }

    /// Issue a token bound to an existing session ID
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_with_session(
        &self,
        admin_id: Uuid,
        session_id: String,
    ) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            session_id,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))?;

        Ok(SessionToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            session_id: claims.session_id,
        })
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn create_test_service() -> JwtService {
        JwtService::new(SECRET, 900)
    }

    #[test]
    fn test_issue_token() {
        let service = create_test_service();
        let token = service.issue(Uuid::new_v4()).unwrap();

        assert!(!token.access_token.is_empty());
        assert!(!token.session_id.is_empty());
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 900);
    }

    #[test]
    fn test_decode_token() {
        let service = create_test_service();
        let admin_id = Uuid::new_v4();

        let token = service
            .issue_with_session(admin_id, "session-123".to_string())
            .unwrap();
        let claims = service.decode_token(&token.access_token).unwrap();

        assert_eq!(claims.admin_id().unwrap(), admin_id);
        assert_eq!(claims.session_id, "session-123");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();

        let result = service.decode_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = JwtService::new("another-secret-key-that-is-long-enough", 900);
        let token = other.issue(Uuid::new_v4()).unwrap();

        let result = create_test_service().decode_token(&token.access_token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: 0,
            exp: Utc::now().timestamp() - 3600,
            session_id: "old".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = create_test_service().decode_token(&token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_claims_admin_id() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: 0,
            exp: i64::MAX,
            session_id: "s".to_string(),
        };
        assert!(matches!(claims.admin_id(), Err(AppError::InvalidToken)));
    }
}
