use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct P2pOffer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub side: String,
    pub token: String,
    pub amount: f64,
    pub price: f64,
    pub payment_method: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
