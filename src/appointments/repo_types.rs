use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;
use time::{Date, Time};

use crate::users::repo_types::UserSummary;
use crate::validation::{clock_time, iso_date, InvalidVariant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = InvalidVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| InvalidVariant {
                field: "status",
                value: s.to_string(),
                expected: "Scheduled, Confirmed, Completed, Cancelled",
            })
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = InvalidVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Cost of a session; derived on read and never stored.
pub fn total_cost(work_hours: f64, hourly_rate: f64) -> f64 {
    work_hours * hourly_rate
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub appointment_id: i32,
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    #[serde(with = "iso_date")]
    pub appointment_date: Date,
    #[serde(with = "clock_time")]
    pub appointment_time: Time,
    pub work_hours: f64,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
}

/// Appointment joined with both parties and the caregiver's current rate.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentWithPartiesRow {
    #[sqlx(flatten)]
    pub appointment: Appointment,
    pub hourly_rate: f64,
    pub caregiver_email: String,
    pub caregiver_given_name: String,
    pub caregiver_surname: String,
    pub member_email: String,
    pub member_given_name: String,
    pub member_surname: String,
}

impl AppointmentWithPartiesRow {
    pub fn caregiver(&self) -> UserSummary {
        UserSummary::new(
            self.appointment.caregiver_user_id,
            self.caregiver_email.clone(),
            self.caregiver_given_name.clone(),
            self.caregiver_surname.clone(),
        )
    }

    pub fn member(&self) -> UserSummary {
        UserSummary::new(
            self.appointment.member_user_id,
            self.member_email.clone(),
            self.member_given_name.clone(),
            self.member_surname.clone(),
        )
    }

    pub fn total_cost(&self) -> f64 {
        total_cost(self.appointment.work_hours, self.hourly_rate)
    }
}

#[derive(Debug)]
pub struct AppointmentFields {
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    pub appointment_date: Date,
    pub appointment_time: Time,
    pub work_hours: f64,
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn row(work_hours: f64, hourly_rate: f64) -> AppointmentWithPartiesRow {
        AppointmentWithPartiesRow {
            appointment: Appointment {
                appointment_id: 1,
                caregiver_user_id: 10,
                member_user_id: 20,
                appointment_date: date!(2025 - 11 - 03),
                appointment_time: time!(9:30),
                work_hours,
                status: AppointmentStatus::Confirmed,
            },
            hourly_rate,
            caregiver_email: "cg@example.com".into(),
            caregiver_given_name: "Askar".into(),
            caregiver_surname: "Bekov".into(),
            member_email: "m@example.com".into(),
            member_given_name: "Dana".into(),
            member_surname: "Omarova".into(),
        }
    }

    #[test]
    fn total_cost_is_hours_times_rate() {
        for (hours, rate) in [(3.0, 2500.0), (1.5, 1800.5), (0.25, 12.34), (8.0, 0.0)] {
            assert_eq!(row(hours, rate).total_cost(), hours * rate);
        }
        assert_eq!(total_cost(2.5, 2000.0), 5000.0);
    }

    #[test]
    fn parties_are_split_out() {
        let r = row(2.0, 10.0);
        assert_eq!(r.caregiver().user_id, 10);
        assert_eq!(r.caregiver().full_name, "Askar Bekov");
        assert_eq!(r.member().user_id, 20);
        assert_eq!(r.member().full_name, "Dana Omarova");
    }

    #[test]
    fn status_defaults_to_scheduled() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn status_vocabulary_is_closed() {
        for st in AppointmentStatus::ALL {
            assert_eq!(st.as_str().parse::<AppointmentStatus>().unwrap(), st);
        }
        assert!("Pending".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn appointment_serializes_date_and_time() {
        let json = serde_json::to_value(&row(2.0, 10.0).appointment).unwrap();
        assert_eq!(json["appointment_date"], "2025-11-03");
        assert_eq!(json["appointment_time"], "09:30");
        assert_eq!(json["status"], "Confirmed");
    }
}
