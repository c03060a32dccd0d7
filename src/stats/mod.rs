use crate::state::AppState;
use axum::Router;

pub mod dto;
mod handlers;
pub mod services;

/// Routes relative to the API prefix.
pub fn router() -> Router<AppState> {
    handlers::stats_routes()
}

/// Absolute routes, merged outside the prefix nest.
pub fn index_router() -> Router<AppState> {
    handlers::index_routes()
}
