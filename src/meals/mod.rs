mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod summary;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::meal_routes())
}
