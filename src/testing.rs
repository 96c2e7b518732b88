//! In-memory store and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    app::build_app,
    auth::{cookies::read_cookie, SessionToken},
    meals::{
        repo::MealStore,
        repo_types::{DietEntry, Meal, MealPatch, NewMeal},
    },
    state::AppState,
    users::{repo::UserStore, repo_types::User},
};

#[derive(Default)]
struct Tables {
    meals: Vec<Meal>,
    users: Vec<User>,
}

/// Both stores over plain vectors; rows stay in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn all_meals(&self) -> Vec<Meal> {
        self.tables().meals.clone()
    }

    pub fn all_users(&self) -> Vec<User> {
        self.tables().users.clone()
    }
}

fn owned_by(meal: &Meal, owner: &SessionToken) -> bool {
    meal.session_id == owner.as_str()
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn create(&self, owner: &SessionToken, meal: NewMeal) -> anyhow::Result<Meal> {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: meal.name,
            description: meal.description,
            time_meal: meal.time_meal,
            diet: meal.diet,
            session_id: owner.as_str().to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables().meals.push(meal.clone());
        Ok(meal)
    }

    async fn update(
        &self,
        owner: &SessionToken,
        id: Uuid,
        patch: MealPatch,
    ) -> anyhow::Result<u64> {
        let mut tables = self.tables();
        let Some(meal) = tables
            .meals
            .iter_mut()
            .find(|m| m.id == id && owned_by(m, owner))
        else {
            return Ok(0);
        };
        if let Some(name) = patch.name {
            meal.name = name;
        }
        if let Some(description) = patch.description {
            meal.description = Some(description);
        }
        if let Some(time_meal) = patch.time_meal {
            meal.time_meal = time_meal;
        }
        if let Some(diet) = patch.diet {
            meal.diet = diet;
        }
        Ok(1)
    }

    async fn delete(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<u64> {
        let mut tables = self.tables();
        let before = tables.meals.len();
        tables.meals.retain(|m| !(m.id == id && owned_by(m, owner)));
        Ok((before - tables.meals.len()) as u64)
    }

    async fn list(&self, owner: &SessionToken) -> anyhow::Result<Vec<Meal>> {
        Ok(self
            .tables()
            .meals
            .iter()
            .filter(|m| owned_by(m, owner))
            .cloned()
            .collect())
    }

    async fn get(&self, owner: &SessionToken, id: Uuid) -> anyhow::Result<Option<Meal>> {
        Ok(self
            .tables()
            .meals
            .iter()
            .find(|m| m.id == id && owned_by(m, owner))
            .cloned())
    }

    async fn chronological(&self, owner: &SessionToken) -> anyhow::Result<Vec<DietEntry>> {
        let mut entries: Vec<DietEntry> = self
            .tables()
            .meals
            .iter()
            .filter(|m| owned_by(m, owner))
            .map(|m| DietEntry {
                time_meal: m.time_meal,
                diet: m.diet,
            })
            .collect();
        // stable: equal meal times keep insertion order
        entries.sort_by_key(|e| e.time_meal);
        Ok(entries)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(
        &self,
        name: &str,
        email: &str,
        session: &SessionToken,
    ) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            session_id: Some(session.as_str().to_owned()),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables().users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.all_users())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<u64> {
        let mut tables = self.tables();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok((before - tables.users.len()) as u64)
    }
}

/// The real router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let router = build_app(AppState::with_memory(store.clone()));
        Self { router, store }
    }
}

/// Sends one request; `session` goes out as the session cookie.
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        request = request.header(header::COOKIE, format!("sessionId={session}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, headers, json)
}

/// Token from a `Set-Cookie` response header.
pub fn session_from(headers: &HeaderMap) -> Option<SessionToken> {
    let set_cookie = headers.get(header::SET_COOKIE)?.to_str().ok()?;
    let mut as_request = HeaderMap::new();
    as_request.insert(header::COOKIE, set_cookie.parse().ok()?);
    read_cookie(&as_request, "sessionId").and_then(SessionToken::from_presented)
}

/// Registers a user without a cookie and returns the issued token.
pub async fn register(app: &TestApp, name: &str, email: &str) -> String {
    let (status, headers, _) = send(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(serde_json::json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    session_from(&headers)
        .expect("registration sets a session cookie")
        .as_str()
        .to_owned()
}
