use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, role::Role};
use db::models::user::User;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::ieo::{CreateOfferingRequest, ParticipateRequest},
    services,
};

#[get("")]
pub async fn get_offerings(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offerings = services::ieo::get_offerings(pg_pool).await?;
    Success::ok("Offerings found", offerings)
}

#[get("/offering/{offering_id}")]
pub async fn get_offering(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offering = services::ieo::get_offering(pg_pool, path.into_inner()).await?;
    Success::ok("Offering found", offering)
}

#[post("", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn post_offering(
    req: web::Json<CreateOfferingRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let offering = services::ieo::create_offering(pg_pool, req.into_inner()).await?;
    Success::created("Offering created", offering)
}

/// Buys `amount` tokens from an open offering.
///
/// # Output
/// - Success: 201 with the participation record
/// - Error: 400 outside the sale window or purchase limits, 404 for an unknown offering
#[post("/offering/{offering_id}/participate", wrap = "auth::middleware(&[])")]
pub async fn post_participate(
    path: web::Path<Uuid>,
    req: web::Json<ParticipateRequest>,
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let participation =
        services::ieo::participate(pg_pool, path.into_inner(), current_user.id, req.amount)
            .await?;
    Success::created("Participation recorded", participation)
}

#[get("/participations", wrap = "auth::middleware(&[])")]
pub async fn get_participations(
    current_user: web::ReqData<User>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let participations = services::ieo::get_participations(pg_pool, current_user.id).await?;
    Success::ok("Participations found", participations)
}
