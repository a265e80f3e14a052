use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::wallet::WalletCreateRequest, models::wallet::Wallet};

pub async fn get_wallets_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Wallet>> {
    sqlx::query_as::<_, Wallet>(
        "SELECT id, user_id, chain, address, label, created_at FROM wallets WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_wallet<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: WalletCreateRequest,
) -> Res<Wallet> {
    sqlx::query_as::<_, Wallet>(
        r#"
        INSERT INTO wallets (user_id, chain, address, label)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, chain, address, label, created_at
        "#,
    )
    .bind(data.user_id)
    .bind(data.chain)
    .bind(data.address)
    .bind(data.label)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Deletes the wallet only when it belongs to `user_id`.
pub async fn delete_user_wallet<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    wallet_id: Uuid,
    user_id: Uuid,
) -> Res<u64> {
    sqlx::query("DELETE FROM wallets WHERE id = $1 AND user_id = $2")
        .bind(wallet_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map(|res| res.rows_affected())
        .map_err(AppError::from)
}
