use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::SessionToken;
use crate::db::PgStore;
use crate::meals::repo_types::{DietEntry, Meal, MealPatch, NewMeal};

/// Meal persistence. Every call is scoped to the rows `owner` created;
/// a row owned by another session behaves exactly like a missing one.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn create(&self, owner: &SessionToken, meal: NewMeal) -> anyhow::Result<Meal>;

    /// Returns the number of rows touched; zero is not an error.
    async fn update(&self, owner: &SessionToken, id: Uuid, patch: MealPatch)
        -> anyhow::Result<u64>;

    /// Returns the number of rows removed; zero is not an error.
    async fn delete(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<u64>;

    async fn list(&self, owner: &SessionToken) -> anyhow::Result<Vec<Meal>>;

    async fn get(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<Option<Meal>>;

    /// Meal time and diet flag, oldest first, ties in insertion order.
    async fn chronological(&self, owner: &SessionToken) -> anyhow::Result<Vec<DietEntry>>;
}

#[async_trait]
impl MealStore for PgStore {
    async fn create(&self, owner: &SessionToken, meal: NewMeal) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, name, description, time_meal, diet, session_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, time_meal, diet, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.time_meal)
        .bind(meal.diet)
        .bind(owner.as_str())
        .fetch_one(&self.db)
        .await?;
        Ok(meal)
    }

    async fn update(
        &self,
        owner: &SessionToken,
        id: Uuid,
        patch: MealPatch,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE meals
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                time_meal = COALESCE($5, time_meal),
                diet = COALESCE($6, diet)
            WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.as_str())
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.time_meal)
        .bind(patch.diet)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND session_id = $2"#)
            .bind(id)
            .bind(owner.as_str())
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list(&self, owner: &SessionToken) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, time_meal, diet, session_id, created_at
            FROM meals
            WHERE session_id = $1
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, name, description, time_meal, diet, session_id, created_at
            FROM meals
            WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(&self.db)
        .await?;
        Ok(meal)
    }

    async fn chronological(&self, owner: &SessionToken) -> anyhow::Result<Vec<DietEntry>> {
        let rows = sqlx::query_as::<_, DietEntry>(
            r#"
            SELECT time_meal, diet
            FROM meals
            WHERE session_id = $1
            ORDER BY time_meal ASC, created_at ASC, id ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
