use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;
use crate::meals::repo_types::{Meal, MealPatch, NewMeal};
use crate::validation::{flag, string, timestamp, Schema};

const TIMESTAMP_ALIASES: &[&str] = &["timeMeal"];
const DIET_ALIASES: &[&str] = &["diet"];

/// Body of `POST /meals`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMealRequest(pub NewMeal);

impl CreateMealRequest {
    pub fn parse(body: &Value) -> Result<Self, AppError> {
        let mut schema = Schema::new(body);
        let name = schema.required("name", &[], string);
        let description = schema.optional("description", &[], string);
        let time_meal = schema.required("timestamp", TIMESTAMP_ALIASES, timestamp);
        let diet = schema.required("dietFlag", DIET_ALIASES, flag);

        let (Some(name), Some(time_meal), Some(diet)) = (name, time_meal, diet) else {
            return Err(schema.into_error());
        };
        schema.check()?;

        Ok(Self(NewMeal {
            name,
            description,
            time_meal,
            diet,
        }))
    }
}

/// Body of `PUT /meals/:id`; every field is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMealRequest(pub MealPatch);

impl UpdateMealRequest {
    pub fn parse(body: &Value) -> Result<Self, AppError> {
        let mut schema = Schema::new(body);
        let patch = MealPatch {
            name: schema.optional("name", &[], string),
            description: schema.optional("description", &[], string),
            time_meal: schema.optional("timestamp", TIMESTAMP_ALIASES, timestamp),
            diet: schema.optional("dietFlag", DIET_ALIASES, flag),
        };
        schema.check()?;
        Ok(Self(patch))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub diet_flag: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Meal> for MealView {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            timestamp: m.time_meal,
            diet_flag: m.diet,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealView>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Option<MealView>,
}
