use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    AddressRequest, CreateMemberRequest, MemberDetails, MemberForm, MemberView,
    UpdateMemberRequest,
};
use super::services;
use crate::{
    error::AppResult,
    pages::{after_delete, Notice, SeeOther},
    state::AppState,
};

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members))
        .route("/members/create", get(create_form).post(create_member))
        .route("/members/:id", get(get_member))
        .route("/members/:id/update", get(update_form).post(update_member))
        .route("/members/:id/delete", post(delete_member))
        .route("/members/:id/addresses", post(add_address))
        .route(
            "/members/:id/addresses/:address_id/delete",
            post(remove_address),
        )
}

#[instrument(skip(state))]
pub async fn list_members(State(state): State<AppState>) -> AppResult<Json<Vec<MemberView>>> {
    Ok(Json(services::list(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MemberDetails>> {
    Ok(Json(services::details(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn create_form(State(state): State<AppState>) -> AppResult<Json<MemberForm>> {
    Ok(Json(services::create_form(&state).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_member(
    State(state): State<AppState>,
    Json(payload): Json<CreateMemberRequest>,
) -> AppResult<SeeOther> {
    services::create(&state, payload).await?;
    Ok(SeeOther::to(
        "/members",
        Notice::success("Member created successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MemberForm>> {
    Ok(Json(services::update_form(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMemberRequest>,
) -> AppResult<SeeOther> {
    services::update(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/members/{id}"),
        Notice::success("Member updated successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<i32>) -> SeeOther {
    after_delete(services::delete(&state, id).await, services::RESOURCE, "/members")
}

#[instrument(skip(state, payload))]
pub async fn add_address(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AddressRequest>,
) -> AppResult<SeeOther> {
    services::add_address(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/members/{id}"),
        Notice::success("Address added successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn remove_address(
    State(state): State<AppState>,
    Path((id, address_id)): Path<(i32, i32)>,
) -> AppResult<SeeOther> {
    services::remove_address(&state, id, address_id).await?;
    Ok(SeeOther::to(
        format!("/members/{id}"),
        Notice::success("Address deleted successfully!"),
    ))
}
