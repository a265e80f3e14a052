use chrono::NaiveDateTime;
use uuid::Uuid;

pub struct OfferingCreateRequest {
    pub token_symbol: String,
    pub token_name: String,
    pub description: Option<String>,
    pub price: f64,
    pub total_supply: f64,
    pub min_purchase: f64,
    pub max_purchase: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

pub struct ParticipationCreateRequest {
    pub offering_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub cost: f64,
}
