use common::error::{AppError, Res};
use db::{dtos::wallet::WalletCreateRequest, models::wallet::Wallet};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::wallet::CreateWalletRequest;

pub async fn get_wallets(pool: &PgPool, user_id: Uuid) -> Res<Vec<Wallet>> {
    db::wallet::get_wallets_by_user_id(pool, user_id).await
}

pub async fn create_wallet(pool: &PgPool, user_id: Uuid, req: CreateWalletRequest) -> Res<Wallet> {
    let req = req.normalized()?;
    db::wallet::insert_wallet(
        pool,
        WalletCreateRequest {
            user_id,
            chain: req.chain,
            address: req.address,
            label: req.label,
        },
    )
    .await
    .map_err(|e| match e {
        AppError::Database(ref db_err) if db::is_unique_violation(db_err) => {
            AppError::Conflict("Wallet already registered".to_string())
        }
        other => other,
    })
}

/// Deletes a wallet owned by `user_id`; someone else's wallet reads as missing.
pub async fn delete_wallet(pool: &PgPool, wallet_id: Uuid, user_id: Uuid) -> Res<()> {
    match db::wallet::delete_user_wallet(pool, wallet_id, user_id).await? {
        0 => Err(AppError::NotFound("Wallet not found".to_string())),
        _ => Ok(()),
    }
}
