use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{cookies::session_cookie, SessionToken},
    error::AppError,
    state::AppState,
    users::dto::{PublicUser, RegisterRequest, UserListResponse, UserResponse},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register).get(list_users))
        .route("/users/:id", get(get_user).delete(delete_user))
}

/// Registers a user under the presented session, or mints one and hands it
/// back as a cookie. A presented token is reused as-is, so one session can
/// back several users.
#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    presented: Option<SessionToken>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    let Json(body) = body?;
    let payload = RegisterRequest::parse(&body)?;

    let mut headers = HeaderMap::new();
    let session = match presented {
        Some(session) => {
            debug!(session = %session.redacted(), "reusing presented session");
            session
        }
        None => {
            let session = SessionToken::issue();
            headers.insert(
                header::SET_COOKIE,
                session_cookie(&state.config.session, &session)?,
            );
            session
        }
    };

    let user = state
        .users
        .create(&payload.name, &payload.email, &session)
        .await?;
    info!(
        user_id = %user.id,
        email = %user.email,
        session = %session.redacted(),
        "user registered"
    );
    Ok((StatusCode::CREATED, headers))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(UserListResponse {
        users: users.into_iter().map(PublicUser::from).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path(id) = id?;
    let user = state.users.find(id).await?;
    Ok(Json(UserResponse {
        user: user.map(PublicUser::from),
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let removed = state.users.delete(id).await?;
    if removed > 0 {
        info!(user_id = %id, "user deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
