use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::dto::Overview;
use super::services;
use crate::{error::AppResult, pages::API_PREFIX, state::AppState};

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview))
        .route("/stats", get(overview))
}

/// A nested `/` only answers the bare prefix; `/api/v1/` is routed here.
pub fn index_routes() -> Router<AppState> {
    Router::new().route(&format!("{API_PREFIX}/"), get(overview))
}

#[instrument(skip(state))]
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<Overview>> {
    Ok(Json(services::overview(&state).await?))
}
