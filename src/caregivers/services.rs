use tracing::info;

use super::dto::{
    CaregiverDetails, CaregiverForm, CaregiverView, CreateCaregiverRequest,
    UpdateCaregiverRequest,
};
use super::repo;
use super::repo_types::{CaregiverFields, Gender};
use crate::error::{AppError, AppResult};
use crate::pages::FormAction;
use crate::state::AppState;
use crate::validation::{at_most, max_len, non_negative, optional, required};
use crate::{appointments, jobs, users};

pub const RESOURCE: &str = "Caregiver";

/// Largest value `NUMERIC(10, 2)` holds.
const MAX_HOURLY_RATE: f64 = 99_999_999.99;

fn validate_fields(
    photo: Option<String>,
    gender: &str,
    caregiving_type: &str,
    hourly_rate: f64,
) -> AppResult<CaregiverFields> {
    let photo = optional(photo);
    if let Some(photo) = &photo {
        max_len("photo", photo, 255)?;
    }
    let caregiving_type = required("caregiving_type", caregiving_type)?;
    max_len("caregiving_type", &caregiving_type, 100)?;
    Ok(CaregiverFields {
        photo,
        gender: gender.parse::<Gender>()?,
        caregiving_type,
        hourly_rate: at_most(
            "hourly_rate",
            non_negative("hourly_rate", hourly_rate)?,
            MAX_HOURLY_RATE,
        )?,
    })
}

pub async fn list(state: &AppState) -> AppResult<Vec<CaregiverView>> {
    let mut tx = state.db.begin().await?;
    let rows = repo::list(&mut tx).await?;
    tx.commit().await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn details(state: &AppState, caregiver_id: i32) -> AppResult<CaregiverDetails> {
    let mut tx = state.db.begin().await?;
    let (caregiver, user) = repo::find(&mut tx, caregiver_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, caregiver_id))?
        .into_parts();
    let appointments = appointments::repo::list_for_caregiver(&mut tx, caregiver_id).await?;
    let job_applications = jobs::repo::applications_for_caregiver(&mut tx, caregiver_id).await?;
    tx.commit().await?;

    Ok(CaregiverDetails {
        caregiver,
        user,
        appointments: appointments.into_iter().map(Into::into).collect(),
        job_applications,
    })
}

pub async fn create_form(state: &AppState) -> AppResult<CaregiverForm> {
    let mut tx = state.db.begin().await?;
    let available_users = users::services::load_available_users(&mut tx).await?;
    tx.commit().await?;
    Ok(CaregiverForm {
        action: FormAction::Create,
        caregiver: None,
        available_users,
        genders: Gender::ALL.to_vec(),
    })
}

pub async fn update_form(state: &AppState, caregiver_id: i32) -> AppResult<CaregiverForm> {
    let mut tx = state.db.begin().await?;
    let caregiver: CaregiverView = repo::find(&mut tx, caregiver_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, caregiver_id))?
        .into();
    tx.commit().await?;
    Ok(CaregiverForm {
        action: FormAction::Update,
        caregiver: Some(caregiver),
        available_users: Vec::new(),
        genders: Gender::ALL.to_vec(),
    })
}

pub async fn create(state: &AppState, req: CreateCaregiverRequest) -> AppResult<i32> {
    let fields = validate_fields(req.photo, &req.gender, &req.caregiving_type, req.hourly_rate)?;

    let mut tx = state.db.begin().await?;
    users::services::ensure_role_free(&mut tx, req.user_id).await?;
    let caregiver = repo::insert(&mut tx, req.user_id, &fields).await?;
    tx.commit().await?;

    info!(caregiver_id = caregiver.caregiver_user_id, "caregiver created");
    Ok(caregiver.caregiver_user_id)
}

pub async fn update(
    state: &AppState,
    caregiver_id: i32,
    req: UpdateCaregiverRequest,
) -> AppResult<()> {
    let fields = validate_fields(req.photo, &req.gender, &req.caregiving_type, req.hourly_rate)?;

    let mut tx = state.db.begin().await?;
    repo::update(&mut tx, caregiver_id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, caregiver_id))?;
    tx.commit().await?;

    info!(caregiver_id, "caregiver updated");
    Ok(())
}

pub async fn delete(state: &AppState, caregiver_id: i32) -> AppResult<bool> {
    let mut tx = state.db.begin().await?;
    let deleted = repo::delete(&mut tx, caregiver_id).await?;
    tx.commit().await?;
    if deleted {
        info!(caregiver_id, "caregiver deleted");
    }
    Ok(deleted)
}
