use serde::{Deserialize, Serialize};
use time::{Date, Time};

use super::repo_types::{Appointment, AppointmentStatus, AppointmentWithPartiesRow};
use crate::caregivers::dto::CaregiverView;
use crate::members::dto::MemberView;
use crate::pages::FormAction;
use crate::users::repo_types::UserSummary;
use crate::validation::{clock_time, iso_date};

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    #[serde(with = "iso_date")]
    pub appointment_date: Date,
    #[serde(with = "clock_time")]
    pub appointment_time: Time,
    pub work_hours: f64,
    /// Missing means `Scheduled`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    #[serde(with = "iso_date")]
    pub appointment_date: Date,
    #[serde(with = "clock_time")]
    pub appointment_time: Time,
    pub work_hours: f64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub caregiver: UserSummary,
    pub member: UserSummary,
    pub hourly_rate: f64,
    pub total_cost: f64,
}

impl From<AppointmentWithPartiesRow> for AppointmentView {
    fn from(row: AppointmentWithPartiesRow) -> Self {
        let caregiver = row.caregiver();
        let member = row.member();
        let total_cost = row.total_cost();
        Self {
            appointment: row.appointment,
            caregiver,
            member,
            hourly_rate: row.hourly_rate,
            total_cost,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppointmentForm {
    pub action: FormAction,
    pub appointment: Option<AppointmentView>,
    pub caregivers: Vec<CaregiverView>,
    pub members: Vec<MemberView>,
    pub statuses: Vec<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_form_formats() {
        let req: CreateAppointmentRequest = serde_json::from_str(
            r#"{"caregiver_user_id": 1, "member_user_id": 2,
                "appointment_date": "2025-12-01", "appointment_time": "14:00",
                "work_hours": 3.5}"#,
        )
        .unwrap();
        assert_eq!(req.appointment_date.to_string(), "2025-12-01");
        assert_eq!(req.appointment_time.hour(), 14);
        assert_eq!(req.appointment_time.minute(), 0);
        assert!(req.status.is_none());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let res = serde_json::from_str::<CreateAppointmentRequest>(
            r#"{"caregiver_user_id": 1, "member_user_id": 2,
                "appointment_date": "01/12/2025", "appointment_time": "14:00",
                "work_hours": 3.5}"#,
        );
        assert!(res.is_err());
    }
}
