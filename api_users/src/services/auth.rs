use chrono::{Duration, NaiveDateTime, Utc};
use common::{
    env_config::Config,
    error::{AppError, Res},
    misc::{generate_code, is_valid_email, normalize_email, verify_hash},
};
use db::models::{user::User, verification::EmailVerification};
use sqlx::PgPool;

use crate::dtos::user::LoginRequest;

pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";

/// Authenticates existing user.
/// Unknown email and wrong password both return the same 401.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let email = normalize_email(&login_data.email);
    let Some((user, credentials)) = db::user::get_user_with_password_hash(pool, &email).await?
    else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if verify_hash(&login_data.password, &credentials.password_hash)? {
        Ok(user)
    } else {
        Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
    }
}

/// Issues a new verification code for `email`, replacing any pending one.
pub async fn issue_email_code(pool: &PgPool, email: &str, config: &Config) -> Res<EmailVerification> {
    if !is_valid_email(email) {
        return Err(AppError::BadRequest("Must be a valid email".to_string()));
    }

    let code = generate_code();
    let expires_at = Utc::now().naive_utc() + Duration::minutes(config.email_code_ttl_minutes);
    let record = db::verification::upsert_code(pool, email, &code, expires_at).await?;

    // TODO: hand the code to a mail transport once one is configured
    log::info!("Verification code issued for {} (expires {})", email, expires_at);
    log::debug!("Verification code for {}: {}", email, code);

    Ok(record)
}

/// Confirms the code and marks both the email and any matching user as verified.
pub async fn confirm_email_code(pool: &PgPool, email: &str, code: &str) -> Res<()> {
    let record = db::verification::find_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::NotFound("No verification requested for this email".to_string()))?;

    check_code(&record, code, Utc::now().naive_utc())?;

    let mut tx = pool.begin().await?;
    db::verification::mark_verified(&mut *tx, email).await?;
    db::user::set_verified_by_email(&mut *tx, email).await?;
    tx.commit().await?;
    Ok(())
}

pub fn check_code(record: &EmailVerification, code: &str, now: NaiveDateTime) -> Res<()> {
    if record.verified {
        return Ok(());
    }
    if now > record.expires_at {
        return Err(AppError::BadRequest("Verification code expired".to_string()));
    }
    if record.code != code.trim() {
        return Err(AppError::BadRequest("Invalid verification code".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_in_minutes: i64, verified: bool) -> EmailVerification {
        let now = Utc::now().naive_utc();
        EmailVerification {
            email: "alice@example.com".to_string(),
            code: "042137".to_string(),
            expires_at: now + Duration::minutes(expires_in_minutes),
            verified,
            created_at: now,
        }
    }

    #[test]
    fn matching_code_within_ttl_passes() {
        let now = Utc::now().naive_utc();
        assert!(check_code(&record(10, false), "042137", now).is_ok());
        assert!(check_code(&record(10, false), " 042137 ", now).is_ok());
    }

    #[test]
    fn wrong_code_fails() {
        let now = Utc::now().naive_utc();
        let err = check_code(&record(10, false), "000000", now).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid verification code"));
    }

    #[test]
    fn expired_code_fails() {
        let now = Utc::now().naive_utc();
        let err = check_code(&record(-1, false), "042137", now).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Verification code expired"));
    }

    #[test]
    fn already_verified_is_idempotent() {
        let now = Utc::now().naive_utc();
        assert!(check_code(&record(-1, true), "whatever", now).is_ok());
    }
}
