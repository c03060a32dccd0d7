use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    CaregiverDetails, CaregiverForm, CaregiverView, CreateCaregiverRequest,
    UpdateCaregiverRequest,
};
use super::services;
use crate::{
    error::AppResult,
    pages::{after_delete, Notice, SeeOther},
    state::AppState,
};

pub fn caregiver_routes() -> Router<AppState> {
    Router::new()
        .route("/caregivers", get(list_caregivers))
        .route("/caregivers/create", get(create_form).post(create_caregiver))
        .route("/caregivers/:id", get(get_caregiver))
        .route("/caregivers/:id/update", get(update_form).post(update_caregiver))
        .route("/caregivers/:id/delete", post(delete_caregiver))
}

#[instrument(skip(state))]
pub async fn list_caregivers(State(state): State<AppState>) -> AppResult<Json<Vec<CaregiverView>>> {
    Ok(Json(services::list(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_caregiver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CaregiverDetails>> {
    Ok(Json(services::details(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<CaregiverForm>> {
    Ok(Json(services::create_form(&state).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_caregiver(
    State(state): State<AppState>,
    Json(payload): Json<CreateCaregiverRequest>,
) -> AppResult<SeeOther> {
    services::create(&state, payload).await?;
    Ok(SeeOther::to(
        "/caregivers",
        Notice::success("Caregiver created successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CaregiverForm>> {
    Ok(Json(services::update_form(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_caregiver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCaregiverRequest>,
) -> AppResult<SeeOther> {
    services::update(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/caregivers/{id}"),
        Notice::success("Caregiver updated successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_caregiver(State(state): State<AppState>, Path(id): Path<i32>) -> SeeOther {
    after_delete(
        services::delete(&state, id).await,
        services::RESOURCE,
        "/caregivers",
    )
}
