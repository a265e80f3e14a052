use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{error::Res, http::Success, role::Role};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{dtos::subscriber::SubscribeRequest, services};

/// Subscribes an email to the newsletter. Subscribing twice returns the
/// existing record.
#[post("")]
pub async fn post_subscribe(
    req: web::Json<SubscribeRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email = req.email()?;
    let subscriber = services::subscriber::subscribe(pg_pool, &email).await?;
    Success::ok("Subscribed successfully", subscriber)
}

#[post("/unsubscribe")]
pub async fn post_unsubscribe(
    req: web::Json<SubscribeRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email = req.email()?;
    services::subscriber::unsubscribe(pg_pool, &email).await?;
    Success::ok("Unsubscribed successfully", email)
}

#[get("", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn get_subscribers(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let subscribers = services::subscriber::get_subscribers(pg_pool).await?;
    Success::ok("Subscribers found", subscribers)
}

#[delete("/subscriber/{subscriber_id}", wrap = "auth::middleware(&[Role::Admin])")]
pub async fn delete_subscriber(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let subscriber_id = path.into_inner();
    services::subscriber::delete_subscriber(pg_pool, subscriber_id).await?;
    Success::ok("Subscriber removed", subscriber_id)
}
