use common::error::{AppError, Res};
use db::models::p2p::P2pOffer;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::offer::{
    CreateOfferRequest, OfferQuery, STATUS_CANCELLED, STATUS_OPEN, check_cancel,
};

pub async fn get_offers(pool: &PgPool, query: OfferQuery) -> Res<Vec<P2pOffer>> {
    db::p2p::get_open_offers(pool, query.into_filter()?).await
}

pub async fn get_user_offers(pool: &PgPool, user_id: Uuid) -> Res<Vec<P2pOffer>> {
    db::p2p::get_offers_by_user_id(pool, user_id).await
}

pub async fn create_offer(pool: &PgPool, user_id: Uuid, req: CreateOfferRequest) -> Res<P2pOffer> {
    let offer = db::p2p::insert_offer(pool, req.validate(user_id)?).await?;
    log::info!("P2P {} offer {} created by {}", offer.side, offer.id, user_id);
    Ok(offer)
}

/// Cancels an open offer of `user_id`. The row is locked for the check and
/// the write, so of two concurrent cancels only one succeeds.
pub async fn cancel_offer(pool: &PgPool, offer_id: Uuid, user_id: Uuid) -> Res<P2pOffer> {
    let mut tx = pool.begin().await?;

    let offer = db::p2p::get_offer_for_update(&mut *tx, offer_id)
        .await
        .map_err(|e| e.or_not_found("Offer"))?;
    check_cancel(&offer, user_id)?;

    let cancelled =
        db::p2p::transition_offer_status(&mut *tx, offer_id, STATUS_OPEN, STATUS_CANCELLED)
            .await?
            .ok_or_else(|| AppError::BadRequest("Offer is no longer open".to_string()))?;

    tx.commit().await?;
    Ok(cancelled)
}

#[cfg(test)]
mod tests {
    use common::role::Role;
    use db::dtos::user::UserCreateRequest;

    use super::*;

    async fn pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = db::setup(&url, false).await.unwrap();
        (*pool).clone()
    }

    async fn open_offer(pool: &PgPool) -> P2pOffer {
        let tag = Uuid::new_v4().simple().to_string();
        let user = db::user::insert_user(
            pool,
            UserCreateRequest {
                username: format!("trader_{}", &tag[..12]),
                email: format!("{}@example.com", tag),
                first_name: String::new(),
                last_name: String::new(),
                role: Role::User,
                age: None,
                verified: true,
            },
        )
        .await
        .unwrap();

        create_offer(
            pool,
            user.id,
            CreateOfferRequest {
                side: "sell".to_string(),
                token: "usdt".to_string(),
                amount: 100.0,
                price: 1.0,
                payment_method: "bank transfer".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[actix_web::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn second_cancel_is_rejected() {
        let pool = pool().await;
        let offer = open_offer(&pool).await;

        let cancelled = cancel_offer(&pool, offer.id, offer.user_id).await.unwrap();
        assert_eq!(cancelled.status, STATUS_CANCELLED);

        let err = cancel_offer(&pool, offer.id, offer.user_id).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[actix_web::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn concurrent_cancels_succeed_once() {
        let pool = pool().await;
        let offer = open_offer(&pool).await;

        let (a, b) = tokio::join!(
            cancel_offer(&pool, offer.id, offer.user_id),
            cancel_offer(&pool, offer.id, offer.user_id),
        );

        let succeeded = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        assert!(
            [a, b]
                .into_iter()
                .any(|r| matches!(r, Err(AppError::BadRequest(_))))
        );
    }
}
