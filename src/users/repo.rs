use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::SessionToken;
use crate::db::PgStore;
use crate::users::repo_types::User;

/// Session identity store: user rows and the token each was registered under.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user bound to `session`. A token may back several users.
    async fn create(&self, name: &str, email: &str, session: &SessionToken)
        -> anyhow::Result<User>;

    async fn list(&self) -> anyhow::Result<Vec<User>>;

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Returns the number of rows removed; zero is not an error.
    async fn delete(&self, id: Uuid) -> anyhow::Result<u64>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(
        &self,
        name: &str,
        email: &str,
        session: &SessionToken,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, session_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, session_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(session.as_str())
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, session_id, created_at FROM users"#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, session_id, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
