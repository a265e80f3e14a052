use common::error::{AppError, Res};
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    dtos::p2p::{OfferCreateRequest, OfferFilter},
    models::p2p::P2pOffer,
};

const OFFER_COLUMNS: &str =
    "id, user_id, side, token, amount, price, payment_method, status, created_at, updated_at";

pub async fn get_open_offers<'e, E>(executor: E, filter: OfferFilter) -> Res<Vec<P2pOffer>>
where
    E: Executor<'e, Database = Postgres>,
{
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {OFFER_COLUMNS} FROM p2p_offers WHERE status = 'open'"
    ));

    if let Some(side) = filter.side {
        qb.push(" AND side = ").push_bind(side);
    }

    if let Some(token) = filter.token {
        qb.push(" AND token = ").push_bind(token);
    }

    qb.push(" ORDER BY created_at DESC");

    qb.build_query_as::<P2pOffer>()
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_offers_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<P2pOffer>> {
    sqlx::query_as::<_, P2pOffer>(&format!(
        "SELECT {OFFER_COLUMNS} FROM p2p_offers WHERE user_id = $1 ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_offer_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offer_id: Uuid,
) -> Res<P2pOffer> {
    sqlx::query_as::<_, P2pOffer>(&format!(
        "SELECT {OFFER_COLUMNS} FROM p2p_offers WHERE id = $1"
    ))
    .bind(offer_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_offer<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: OfferCreateRequest,
) -> Res<P2pOffer> {
    sqlx::query_as::<_, P2pOffer>(&format!(
        r#"
        INSERT INTO p2p_offers (user_id, side, token, amount, price, payment_method)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {OFFER_COLUMNS}
        "#
    ))
    .bind(data.user_id)
    .bind(data.side)
    .bind(data.token)
    .bind(data.amount)
    .bind(data.price)
    .bind(data.payment_method)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Locks the offer row until the surrounding transaction ends.
pub async fn get_offer_for_update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offer_id: Uuid,
) -> Res<P2pOffer> {
    sqlx::query_as::<_, P2pOffer>(&format!(
        "SELECT {OFFER_COLUMNS} FROM p2p_offers WHERE id = $1 FOR UPDATE"
    ))
    .bind(offer_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Moves an offer from status `from` to `to`. `None` means the offer was
/// no longer in `from`, and nothing was written.
pub async fn transition_offer_status<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    offer_id: Uuid,
    from: &str,
    to: &str,
) -> Res<Option<P2pOffer>> {
    sqlx::query_as::<_, P2pOffer>(&format!(
        r#"
        UPDATE p2p_offers SET status = $1, updated_at = NOW()
        WHERE id = $2 AND status = $3
        RETURNING {OFFER_COLUMNS}
        "#
    ))
    .bind(to)
    .bind(offer_id)
    .bind(from)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
