use chrono::Utc;
use common::error::Res;
use db::{
    dtos::ieo::ParticipationCreateRequest,
    models::ieo::{IeoOffering, IeoParticipation},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::ieo::{CreateOfferingRequest, check_participation};

pub async fn get_offerings(pool: &PgPool) -> Res<Vec<IeoOffering>> {
    db::ieo::get_offerings(pool).await
}

pub async fn get_offering(pool: &PgPool, offering_id: Uuid) -> Res<IeoOffering> {
    db::ieo::get_offering_by_id(pool, offering_id)
        .await
        .map_err(|e| e.or_not_found("Offering"))
}

pub async fn create_offering(pool: &PgPool, req: CreateOfferingRequest) -> Res<IeoOffering> {
    let offering = db::ieo::insert_offering(pool, req.validate()?).await?;
    log::info!(
        "IEO offering {} created for {}",
        offering.id,
        offering.token_symbol
    );
    Ok(offering)
}

/// Records a purchase. The offering row stays locked while the sold counter
/// is checked and bumped, so concurrent buyers cannot oversell it.
pub async fn participate(
    pool: &PgPool,
    offering_id: Uuid,
    user_id: Uuid,
    amount: f64,
) -> Res<IeoParticipation> {
    let mut tx = pool.begin().await?;

    let offering = db::ieo::get_offering_for_update(&mut *tx, offering_id)
        .await
        .map_err(|e| e.or_not_found("Offering"))?;
    let cost = check_participation(&offering, amount, Utc::now().naive_utc())?;

    db::ieo::add_sold(&mut *tx, offering_id, amount).await?;
    let participation = db::ieo::insert_participation(
        &mut *tx,
        ParticipationCreateRequest {
            offering_id,
            user_id,
            amount,
            cost,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(participation)
}

pub async fn get_participations(pool: &PgPool, user_id: Uuid) -> Res<Vec<IeoParticipation>> {
    db::ieo::get_participations_by_user_id(pool, user_id).await
}
