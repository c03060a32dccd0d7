use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDetails, UserForm, UserListItem};
use super::services;
use crate::{
    error::AppResult,
    pages::{after_delete, FormAction, Notice, SeeOther},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/create", get(create_form).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/update", get(update_form).post(update_user))
        .route("/users/:id/delete", post(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserListItem>>> {
    Ok(Json(services::list(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserDetails>> {
    Ok(Json(services::details(&state, id).await?))
}

pub async fn create_form() -> Json<UserForm> {
    Json(UserForm {
        action: FormAction::Create,
        user: None,
    })
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<SeeOther> {
    services::create(&state, payload).await?;
    Ok(SeeOther::to("/users", Notice::success("User created successfully!")))
}

#[instrument(skip(state))]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserForm>> {
    let user = services::get(&state, id).await?;
    Ok(Json(UserForm {
        action: FormAction::Update,
        user: Some(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<SeeOther> {
    services::update(&state, id, payload).await?;
    Ok(SeeOther::to(
        format!("/users/{id}"),
        Notice::success("User updated successfully!"),
    ))
}

#[instrument(skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> SeeOther {
    after_delete(services::delete(&state, id).await, services::RESOURCE, "/users")
}
