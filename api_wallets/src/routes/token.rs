use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::services;

/// Cached top tokens, refreshed by the background job.
#[get("/top-tokens")]
pub async fn get_top_tokens(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let tokens = services::token::get_top_tokens(pg_pool).await?;
    Success::ok("Top tokens", tokens)
}
