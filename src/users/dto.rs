use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::users::repo_types::User;
use crate::validation::{string, Schema};

/// Request body for user registration.
#[derive(Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

impl RegisterRequest {
    pub fn parse(body: &Value) -> Result<Self, AppError> {
        let mut schema = Schema::new(body);
        let name = schema.required("name", &[], string);
        let email = schema.required("email", &[], string);
        let (Some(name), Some(email)) = (name, email) else {
            return Err(schema.into_error());
        };
        Ok(Self { name, email })
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: Option<PublicUser>,
}
