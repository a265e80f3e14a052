use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct IeoOffering {
    pub id: Uuid,
    pub token_symbol: String,
    pub token_name: String,
    pub description: Option<String>,
    pub price: f64,
    pub total_supply: f64,
    pub sold: f64,
    pub min_purchase: f64,
    pub max_purchase: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl IeoOffering {
    pub fn remaining(&self) -> f64 {
        (self.total_supply - self.sold).max(0.0)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct IeoParticipation {
    pub id: Uuid,
    pub offering_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub cost: f64,
    pub created_at: NaiveDateTime,
}
