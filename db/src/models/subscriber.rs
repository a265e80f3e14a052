use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: NaiveDateTime,
}
