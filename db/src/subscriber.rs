use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::subscriber::Subscriber;

/// Inserts the email or returns the existing subscriber for it.
pub async fn upsert_subscriber<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Subscriber> {
    // the no-op update makes RETURNING yield the existing row on conflict
    sqlx::query_as::<_, Subscriber>(
        r#"
        INSERT INTO subscribers (email)
        VALUES ($1)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id, email, created_at
        "#,
    )
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_subscribers<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Subscriber>> {
    sqlx::query_as::<_, Subscriber>(
        "SELECT id, email, created_at FROM subscribers ORDER BY created_at DESC",
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn delete_subscriber_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<u64> {
    sqlx::query("DELETE FROM subscribers WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}

pub async fn delete_subscriber<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    subscriber_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM subscribers WHERE id = $1")
        .bind(subscriber_id)
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}
