use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{ApplyRequest, JobDetails, JobForm, JobRequest, JobView};
use super::services;
use crate::{
    error::AppResult,
    pages::{after_delete, Notice, SeeOther},
    state::AppState,
};

pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/create", get(create_form).post(create_job))
        .route("/jobs/:id", get(get_job))
        .route("/jobs/:id/update", get(update_form).post(update_job))
        .route("/jobs/:id/delete", post(delete_job))
        .route("/jobs/:id/applications", post(apply))
        .route(
            "/jobs/:id/applications/:application_id/delete",
            post(withdraw),
        )
}

#[instrument(skip(state))]
pub async fn list_jobs(State(state): State<AppState>) -> AppResult<Json<Vec<JobView>>> {
    Ok(Json(services::list(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<JobDetails>> {
    Ok(Json(services::details(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<JobForm>> {
    Ok(Json(services::form(&state, None).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<JobRequest>,
) -> AppResult<SeeOther> {
    services::create(&state, payload).await?;
    Ok(SeeOther::to(
        "/jobs",
        Notice::success("Job created successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<JobForm>> {
    Ok(Json(services::form(&state, Some(id)).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<JobRequest>,
) -> AppResult<SeeOther> {
    services::update(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/jobs/{id}"),
        Notice::success("Job updated successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_job(State(state): State<AppState>, Path(id): Path<i32>) -> SeeOther {
    after_delete(services::delete(&state, id).await, services::RESOURCE, "/jobs")
}

#[instrument(skip(state, payload))]
pub async fn apply(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ApplyRequest>,
) -> AppResult<SeeOther> {
    services::apply(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/jobs/{id}"),
        Notice::success("Application submitted successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn withdraw(
    State(state): State<AppState>,
    Path((id, application_id)): Path<(i32, i32)>,
) -> AppResult<SeeOther> {
    services::withdraw(&state, id, application_id).await?;
    Ok(SeeOther::to(
        format!("/jobs/{id}"),
        Notice::success("Application withdrawn successfully!"),
    ))
}
