use chrono::NaiveDateTime;
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::verification::EmailVerification;

/// Stores a fresh code for the email, replacing any earlier one.
pub async fn upsert_code<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
    code: &str,
    expires_at: NaiveDateTime,
) -> Res<EmailVerification> {
    sqlx::query_as::<_, EmailVerification>(
        r#"
        INSERT INTO email_verifications (email, code, expires_at, verified)
        VALUES ($1, $2, $3, FALSE)
        ON CONFLICT (email) DO UPDATE
        SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at, verified = FALSE, created_at = NOW()
        RETURNING email, code, expires_at, verified, created_at
        "#,
    )
    .bind(email)
    .bind(code)
    .bind(expires_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn find_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<EmailVerification>> {
    sqlx::query_as::<_, EmailVerification>(
        "SELECT email, code, expires_at, verified, created_at FROM email_verifications WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn mark_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<()> {
    sqlx::query("UPDATE email_verifications SET verified = TRUE WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn is_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM email_verifications WHERE email = $1 AND verified)",
    )
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
