use tracing::info;

use super::dto::{
    AppointmentForm, AppointmentView, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use super::repo;
use super::repo_types::{AppointmentFields, AppointmentStatus};
use crate::error::{AppError, AppResult};
use crate::pages::FormAction;
use crate::state::AppState;
use crate::validation::{at_most, positive};
use crate::{caregivers, members};

pub const RESOURCE: &str = "Appointment";

/// Largest value `NUMERIC(5, 2)` holds.
const MAX_WORK_HOURS: f64 = 999.99;

fn work_hours(value: f64) -> AppResult<f64> {
    at_most("work_hours", positive("work_hours", value)?, MAX_WORK_HOURS)
}

fn parse_status(status: Option<&str>) -> AppResult<AppointmentStatus> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Ok(s.parse()?),
        None => Ok(AppointmentStatus::default()),
    }
}

pub async fn list(state: &AppState) -> AppResult<Vec<AppointmentView>> {
    let mut tx = state.db.begin().await?;
    let rows = repo::list(&mut tx).await?;
    tx.commit().await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn details(state: &AppState, appointment_id: i32) -> AppResult<AppointmentView> {
    let mut tx = state.db.begin().await?;
    let row = repo::find(&mut tx, appointment_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, appointment_id))?;
    tx.commit().await?;
    Ok(row.into())
}

pub async fn form(state: &AppState, appointment_id: Option<i32>) -> AppResult<AppointmentForm> {
    let mut tx = state.db.begin().await?;
    let appointment: Option<AppointmentView> = match appointment_id {
        Some(id) => Some(
            repo::find(&mut tx, id)
                .await?
                .ok_or_else(|| AppError::not_found(RESOURCE, id))?
                .into(),
        ),
        None => None,
    };
    let caregiver_rows = caregivers::repo::list(&mut tx).await?;
    let member_rows = members::repo::list(&mut tx).await?;
    tx.commit().await?;

    Ok(AppointmentForm {
        action: if appointment.is_some() {
            FormAction::Update
        } else {
            FormAction::Create
        },
        appointment,
        caregivers: caregiver_rows.into_iter().map(Into::into).collect(),
        members: member_rows.into_iter().map(Into::into).collect(),
        statuses: AppointmentStatus::ALL.to_vec(),
    })
}

pub async fn create(state: &AppState, req: CreateAppointmentRequest) -> AppResult<i32> {
    let fields = AppointmentFields {
        caregiver_user_id: req.caregiver_user_id,
        member_user_id: req.member_user_id,
        appointment_date: req.appointment_date,
        appointment_time: req.appointment_time,
        work_hours: work_hours(req.work_hours)?,
        status: parse_status(req.status.as_deref())?,
    };

    let mut tx = state.db.begin().await?;
    let appointment = repo::insert(&mut tx, &fields).await?;
    tx.commit().await?;

    info!(appointment_id = appointment.appointment_id, "appointment created");
    Ok(appointment.appointment_id)
}

pub async fn update(
    state: &AppState,
    appointment_id: i32,
    req: UpdateAppointmentRequest,
) -> AppResult<()> {
    let fields = AppointmentFields {
        caregiver_user_id: req.caregiver_user_id,
        member_user_id: req.member_user_id,
        appointment_date: req.appointment_date,
        appointment_time: req.appointment_time,
        work_hours: work_hours(req.work_hours)?,
        status: req.status.parse()?,
    };

    let mut tx = state.db.begin().await?;
    repo::update(&mut tx, appointment_id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, appointment_id))?;
    tx.commit().await?;

    info!(appointment_id, "appointment updated");
    Ok(())
}

pub async fn delete(state: &AppState, appointment_id: i32) -> AppResult<bool> {
    let mut tx = state.db.begin().await?;
    let deleted = repo::delete(&mut tx, appointment_id).await?;
    tx.commit().await?;
    if deleted {
        info!(appointment_id, "appointment deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_hours_stay_within_column_range() {
        assert_eq!(work_hours(7.5).unwrap(), 7.5);
        assert!(matches!(work_hours(0.0), Err(AppError::Validation(_))));
        let err = work_hours(1000.0).unwrap_err();
        assert_eq!(err.to_string(), "work_hours must be at most 999.99");
    }

    #[test]
    fn missing_status_means_scheduled() {
        assert_eq!(parse_status(None).unwrap(), AppointmentStatus::Scheduled);
        assert_eq!(parse_status(Some("")).unwrap(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn given_status_is_parsed() {
        assert_eq!(
            parse_status(Some("Completed")).unwrap(),
            AppointmentStatus::Completed
        );
        assert!(matches!(
            parse_status(Some("Done")),
            Err(AppError::Validation(_))
        ));
    }
}
