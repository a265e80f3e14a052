use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EmailVerification {
    pub email: String,
    #[serde(skip_serializing)]
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub verified: bool,
    pub created_at: NaiveDateTime,
}
