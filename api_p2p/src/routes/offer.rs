use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::offer::{CreateOfferRequest, OfferQuery},
    services,
};

/// Open offers, optionally filtered by `?side=buy|sell&token=SYMBOL`.
#[get("/offers")]
pub async fn get_offers(
    query: web::Query<OfferQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offers = services::offer::get_offers(pg_pool, query.into_inner()).await?;
    Success::ok("Offers found", offers)
}

#[get("/offers/mine", wrap = "auth::middleware(&[])")]
pub async fn get_my_offers(
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offers = services::offer::get_user_offers(pg_pool, current_user.id).await?;
    Success::ok("Offers found", offers)
}

#[post("/offers", wrap = "auth::middleware(&[])")]
pub async fn post_offer(
    req: web::Json<CreateOfferRequest>,
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offer = services::offer::create_offer(pg_pool, current_user.id, req.into_inner()).await?;
    Success::created("Offer created", offer)
}

#[post("/offers/{offer_id}/cancel", wrap = "auth::middleware(&[])")]
pub async fn post_cancel_offer(
    path: web::Path<Uuid>,
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offer =
        services::offer::cancel_offer(pg_pool, path.into_inner(), current_user.id).await?;
    Success::ok("Offer cancelled", offer)
}
