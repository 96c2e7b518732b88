use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::SessionToken,
    error::AppError,
    meals::{
        dto::{CreateMealRequest, MealListResponse, MealResponse, UpdateMealRequest},
        summary::{summarize, MealSummary},
    },
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/summary", get(meal_summary))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

// The session extractor runs before path and body, so a missing cookie is
// rejected ahead of any validation or store access.

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    session: SessionToken,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = body?;
    let CreateMealRequest(new_meal) = CreateMealRequest::parse(&body)?;

    let meal = state.meals.create(&session, new_meal).await?;
    info!(meal_id = %meal.id, diet = meal.diet, "meal created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    session: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let UpdateMealRequest(patch) = UpdateMealRequest::parse(&body)?;

    if patch.is_empty() {
        debug!(%id, "empty meal patch");
    }
    let touched = state.meals.update(&session, id, patch).await?;
    if touched == 0 {
        debug!(%id, "no meal matched update in this session");
    } else {
        info!(%id, "meal updated");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    session: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;

    let removed = state.meals.delete(&session, id).await?;
    if removed == 0 {
        debug!(%id, "no meal matched delete in this session");
    } else {
        info!(%id, "meal deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    session: SessionToken,
) -> Result<Json<MealListResponse>, AppError> {
    let meals = state.meals.list(&session).await?;
    Ok(Json(MealListResponse {
        meals: meals.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    session: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MealResponse>, AppError> {
    let Path(id) = id?;
    let meal = state.meals.get(&session, id).await?;
    Ok(Json(MealResponse {
        meal: meal.map(Into::into),
    }))
}

#[instrument(skip(state))]
pub async fn meal_summary(
    State(state): State<AppState>,
    session: SessionToken,
) -> Result<Json<MealSummary>, AppError> {
    let entries = state.meals.chronological(&session).await?;
    let summary = summarize(entries.iter().map(|e| e.diet));
    debug!(?summary, "summary computed");
    Ok(Json(summary))
}
