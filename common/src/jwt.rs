use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub user_id: Uuid,
    pub exp: usize,
}

/// Generates JWT token for the user based on JWT configuration options
pub fn generate_jwt(user_id: Uuid, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.expiration_hours))
        .ok_or_else(|| AppError::Internal("Token expiration out of range".to_string()))?
        .timestamp();

    let claims = JwtClaims {
        user_id,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims object from JWT token.
/// Requires JWT secret.
pub fn validate_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Returns the token part of a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, hours: i64) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_hours: hours,
        }
    }

    #[test]
    fn issued_token_validates_with_same_secret() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt(user_id, &config("s3cret", 1)).unwrap();
        let claims = validate_jwt(&token, "s3cret").unwrap();
        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_jwt(Uuid::new_v4(), &config("one", 1)).unwrap();
        assert!(matches!(validate_jwt(&token, "two"), Err(AppError::JWT(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = generate_jwt(Uuid::new_v4(), &config("s3cret", -2)).unwrap();
        assert!(validate_jwt(&token, "s3cret").is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }
}
