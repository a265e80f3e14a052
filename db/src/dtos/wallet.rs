use uuid::Uuid;

pub struct WalletCreateRequest {
    pub user_id: Uuid,
    pub chain: String,
    pub address: String,
    pub label: Option<String>,
}
