use uuid::Uuid;

pub struct OfferCreateRequest {
    pub user_id: Uuid,
    pub side: String,
    pub token: String,
    pub amount: f64,
    pub price: f64,
    pub payment_method: String,
}

pub struct OfferFilter {
    pub side: Option<String>,
    pub token: Option<String>,
}
