use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub session_id: Option<String>,   // session token, never exposed in JSON
    pub created_at: OffsetDateTime,   // creation timestamp
}
