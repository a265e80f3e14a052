use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::ieo::{OfferingCreateRequest, ParticipationCreateRequest},
    models::ieo::{IeoOffering, IeoParticipation},
};

const OFFERING_COLUMNS: &str = "id, token_symbol, token_name, description, price, total_supply, sold, min_purchase, max_purchase, start_time, end_time, created_at";

pub async fn get_offerings<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<IeoOffering>> {
    sqlx::query_as::<_, IeoOffering>(&format!(
        "SELECT {OFFERING_COLUMNS} FROM ieo_offerings ORDER BY start_time DESC"
    ))
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_offering_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offering_id: Uuid,
) -> Res<IeoOffering> {
    sqlx::query_as::<_, IeoOffering>(&format!(
        "SELECT {OFFERING_COLUMNS} FROM ieo_offerings WHERE id = $1"
    ))
    .bind(offering_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Locks the offering row until the surrounding transaction ends.
pub async fn get_offering_for_update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offering_id: Uuid,
) -> Res<IeoOffering> {
    sqlx::query_as::<_, IeoOffering>(&format!(
        "SELECT {OFFERING_COLUMNS} FROM ieo_offerings WHERE id = $1 FOR UPDATE"
    ))
    .bind(offering_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_offering<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: OfferingCreateRequest,
) -> Res<IeoOffering> {
    sqlx::query_as::<_, IeoOffering>(&format!(
        r#"
        INSERT INTO ieo_offerings (token_symbol, token_name, description, price, total_supply,
                                   min_purchase, max_purchase, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {OFFERING_COLUMNS}
        "#
    ))
    .bind(data.token_symbol)
    .bind(data.token_name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.total_supply)
    .bind(data.min_purchase)
    .bind(data.max_purchase)
    .bind(data.start_time)
    .bind(data.end_time)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn add_sold<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offering_id: Uuid,
    amount: f64,
) -> Res<()> {
    sqlx::query("UPDATE ieo_offerings SET sold = sold + $1 WHERE id = $2")
        .bind(amount)
        .bind(offering_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn insert_participation<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ParticipationCreateRequest,
) -> Res<IeoParticipation> {
    sqlx::query_as::<_, IeoParticipation>(
        r#"
        INSERT INTO ieo_participations (offering_id, user_id, amount, cost)
        VALUES ($1, $2, $3, $4)
        RETURNING id, offering_id, user_id, amount, cost, created_at
        "#,
    )
    .bind(data.offering_id)
    .bind(data.user_id)
    .bind(data.amount)
    .bind(data.cost)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_participations_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<IeoParticipation>> {
    sqlx::query_as::<_, IeoParticipation>(
        r#"
        SELECT id, offering_id, user_id, amount, cost, created_at
        FROM ieo_participations
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
