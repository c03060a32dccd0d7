use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    AppointmentForm, AppointmentView, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use super::services;
use crate::{
    error::AppResult,
    pages::{after_delete, Notice, SeeOther},
    state::AppState,
};

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments))
        .route(
            "/appointments/create",
            get(create_form).post(create_appointment),
        )
        .route("/appointments/:id", get(get_appointment))
        .route(
            "/appointments/:id/update",
            get(update_form).post(update_appointment),
        )
        .route("/appointments/:id/delete", post(delete_appointment))
}

#[instrument(skip(state))]
pub async fn list_appointments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AppointmentView>>> {
    Ok(Json(services::list(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AppointmentView>> {
    Ok(Json(services::details(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<AppointmentForm>> {
    Ok(Json(services::form(&state, None).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<SeeOther> {
    services::create(&state, payload).await?;
    Ok(SeeOther::to(
        "/appointments",
        Notice::success("Appointment created successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AppointmentForm>> {
    Ok(Json(services::form(&state, Some(id)).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> AppResult<SeeOther> {
    services::update(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/appointments/{id}"),
        Notice::success("Appointment updated successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_appointment(State(state): State<AppState>, Path(id): Path<i32>) -> SeeOther {
    after_delete(
        services::delete(&state, id).await,
        services::RESOURCE,
        "/appointments",
    )
}
