use common::error::{AppError, Res};
use db::models::subscriber::Subscriber;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn subscribe(pool: &PgPool, email: &str) -> Res<Subscriber> {
    let subscriber = db::subscriber::upsert_subscriber(pool, email).await?;
    log::info!("Subscriber {} registered", subscriber.id);
    Ok(subscriber)
}

pub async fn unsubscribe(pool: &PgPool, email: &str) -> Res<()> {
    match db::subscriber::delete_subscriber_by_email(pool, email).await? {
        0 => Err(AppError::NotFound("Subscriber not found".to_string())),
        _ => Ok(()),
    }
}

pub async fn get_subscribers(pool: &PgPool) -> Res<Vec<Subscriber>> {
    db::subscriber::get_subscribers(pool).await
}

pub async fn delete_subscriber(pool: &PgPool, subscriber_id: Uuid) -> Res<()> {
    match db::subscriber::delete_subscriber(pool, subscriber_id).await? {
        0 => Err(AppError::NotFound("Subscriber not found".to_string())),
        _ => Ok(()),
    }
}
