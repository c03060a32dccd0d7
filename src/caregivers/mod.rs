use crate::state::AppState;
use axum::Router;

pub mod dto;
mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::caregiver_routes()
}
