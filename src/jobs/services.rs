use time::OffsetDateTime;
use tracing::info;

use super::dto::{ApplyRequest, JobDetails, JobForm, JobRequest, JobView};
use super::repo;
use super::repo_types::JobFields;
use crate::error::{AppError, AppResult};
use crate::members;
use crate::pages::FormAction;
use crate::state::AppState;
use crate::validation::{max_len, optional, required};

pub const RESOURCE: &str = "Job";
pub const APPLICATION: &str = "Application";

fn validate_job(req: JobRequest) -> AppResult<JobFields> {
    let required_caregiving_type =
        required("required_caregiving_type", &req.required_caregiving_type)?;
    max_len("required_caregiving_type", &required_caregiving_type, 100)?;
    Ok(JobFields {
        member_user_id: req.member_user_id,
        required_caregiving_type,
        other_requirements: optional(req.other_requirements),
        date_posted: req.date_posted,
    })
}

pub async fn list(state: &AppState) -> AppResult<Vec<JobView>> {
    let mut tx = state.db.begin().await?;
    let rows = repo::list(&mut tx).await?;
    tx.commit().await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn details(state: &AppState, job_id: i32) -> AppResult<JobDetails> {
    let mut tx = state.db.begin().await?;
    let (job, member) = repo::find(&mut tx, job_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, job_id))?
        .into_parts();
    let applications = repo::applications_for_job(&mut tx, job_id).await?;
    tx.commit().await?;

    Ok(JobDetails {
        job,
        member,
        applications: applications.into_iter().map(Into::into).collect(),
    })
}

pub async fn form(state: &AppState, job_id: Option<i32>) -> AppResult<JobForm> {
    let mut tx = state.db.begin().await?;
    let job: Option<JobView> = match job_id {
        Some(id) => Some(
            repo::find(&mut tx, id)
                .await?
                .ok_or_else(|| AppError::not_found(RESOURCE, id))?
                .into(),
        ),
        None => None,
    };
    let member_rows = members::repo::list(&mut tx).await?;
    tx.commit().await?;

    Ok(JobForm {
        action: if job.is_some() {
            FormAction::Update
        } else {
            FormAction::Create
        },
        job,
        members: member_rows.into_iter().map(Into::into).collect(),
    })
}

pub async fn create(state: &AppState, req: JobRequest) -> AppResult<i32> {
    let fields = validate_job(req)?;

    let mut tx = state.db.begin().await?;
    let job = repo::insert(&mut tx, &fields).await?;
    tx.commit().await?;

    info!(job_id = job.job_id, member_id = job.member_user_id, "job posted");
    Ok(job.job_id)
}

pub async fn update(state: &AppState, job_id: i32, req: JobRequest) -> AppResult<()> {
    let fields = validate_job(req)?;

    let mut tx = state.db.begin().await?;
    repo::update(&mut tx, job_id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, job_id))?;
    tx.commit().await?;

    info!(job_id, "job updated");
    Ok(())
}

pub async fn delete(state: &AppState, job_id: i32) -> AppResult<bool> {
    let mut tx = state.db.begin().await?;
    let deleted = repo::delete(&mut tx, job_id).await?;
    tx.commit().await?;
    if deleted {
        info!(job_id, "job deleted");
    }
    Ok(deleted)
}

pub async fn apply(state: &AppState, job_id: i32, req: ApplyRequest) -> AppResult<i32> {
    let date_applied = req
        .date_applied
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let mut tx = state.db.begin().await?;
    if !repo::exists(&mut tx, job_id).await? {
        return Err(AppError::not_found(RESOURCE, job_id));
    }
    let application =
        repo::insert_application(&mut tx, job_id, req.caregiver_user_id, date_applied).await?;
    tx.commit().await?;

    info!(
        job_id,
        caregiver_id = req.caregiver_user_id,
        application_id = application.application_id,
        "application recorded"
    );
    Ok(application.application_id)
}

pub async fn withdraw(state: &AppState, job_id: i32, application_id: i32) -> AppResult<()> {
    let mut tx = state.db.begin().await?;
    if !repo::exists(&mut tx, job_id).await? {
        return Err(AppError::not_found(RESOURCE, job_id));
    }
    if !repo::delete_application(&mut tx, job_id, application_id).await? {
        return Err(AppError::not_found(APPLICATION, application_id));
    }
    tx.commit().await?;

    info!(job_id, application_id, "application withdrawn");
    Ok(())
}
