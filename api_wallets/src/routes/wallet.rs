use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{error::Res, http::Success, role::Role};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::wallet::CreateWalletRequest, services};

/// Lists the wallets of the authenticated user.
#[get("", wrap = "auth::middleware(&[])")]
pub async fn get_my_wallets(
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let wallets = services::wallet::get_wallets(pg_pool, current_user.id).await?;
    Success::ok("Wallets found", wallets)
}

/// Registers a wallet address for the authenticated user.
///
/// # Output
/// - Success: 201 with the stored wallet
/// - Error: 400 on invalid input, 409 if the address is already registered
#[post("", wrap = "auth::middleware(&[])")]
pub async fn post_wallet(
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<CreateWalletRequest>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let wallet =
        services::wallet::create_wallet(pg_pool, current_user.id, req.into_inner()).await?;
    Success::created("Wallet created", wallet)
}

/// Lists the wallets of user `{id}`. Owner or admin only.
#[get("/user/{id}", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn get_user_wallets(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let wallets = services::wallet::get_wallets(pg_pool, path.into_inner()).await?;
    Success::ok("Wallets found", wallets)
}

#[delete("/wallet/{wallet_id}", wrap = "auth::middleware(&[])")]
pub async fn delete_wallet(
    path: web::Path<Uuid>,
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let wallet_id = path.into_inner();
    services::wallet::delete_wallet(pg_pool, wallet_id, current_user.id).await?;
    Success::ok("Wallet deleted", wallet_id)
}
