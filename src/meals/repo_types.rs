use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub time_meal: OffsetDateTime,   // when the meal was eaten
    pub diet: bool,                  // true = on-diet
    #[serde(skip_serializing)]
    pub session_id: String,          // owning session token
    pub created_at: OffsetDateTime,  // insertion time, chronological tiebreak
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub description: Option<String>,
    pub time_meal: OffsetDateTime,
    pub diet: bool,
}

/// Partial update; `None` leaves the column as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub time_meal: Option<OffsetDateTime>,
    pub diet: Option<bool>,
}

impl MealPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.time_meal.is_none()
            && self.diet.is_none()
    }
}

/// The two columns the streak fold needs.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DietEntry {
    pub time_meal: OffsetDateTime,
    pub diet: bool,
}
