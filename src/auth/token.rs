use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Role,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 bearer tokens signed with the configured secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Token for `user_id` using the configured lifetime.
    pub fn issue_access_token(&self, user_id: Uuid, role: Role) -> AppResult<String> {
        self.issue(user_id, role, self.ttl)
    }

    pub fn issue(&self, user_id: Uuid, role: Role, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: expiration.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// `None` for anything that is expired, tampered with, or not a token at all.
    pub fn verify(&self, token: &str) -> Option<Uuid> {
        let decoded = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data,
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                return None;
            }
        };
        Uuid::parse_str(&decoded.claims.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 30)
    }

    #[test]
    fn verify_returns_the_issued_subject() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens.issue_access_token(user_id, Role::Student).unwrap();
        assert_eq!(tokens.verify(&token), Some(user_id));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let token = tokens
            .issue(Uuid::new_v4(), Role::Admin, Duration::minutes(-5))
            .unwrap();
        assert_eq!(tokens.verify(&token), None);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenService::new("another-secret", 30);
        let token = other
            .issue_access_token(Uuid::new_v4(), Role::Teacher)
            .unwrap();
        assert_eq!(service().verify(&token), None);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens
            .issue_access_token(Uuid::new_v4(), Role::Student)
            .unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let forged = tokens
            .issue_access_token(Uuid::new_v4(), Role::Admin)
            .unwrap();
        parts[1] = forged.split('.').nth(1).unwrap().to_string();
        assert_eq!(tokens.verify(&parts.join(".")), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(service().verify("not.a.token"), None);
        assert_eq!(service().verify(""), None);
    }
}
