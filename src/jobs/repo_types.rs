use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::users::repo_types::UserSummary;
use crate::validation::iso_date;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub job_id: i32,
    pub member_user_id: i32,
    pub required_caregiving_type: String,
    pub other_requirements: Option<String>,
    #[serde(with = "iso_date")]
    pub date_posted: Date,
}

/// Job joined with the posting member's user.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithMemberRow {
    #[sqlx(flatten)]
    pub job: Job,
    pub email: String,
    pub given_name: String,
    pub surname: String,
}

impl JobWithMemberRow {
    pub fn into_parts(self) -> (Job, UserSummary) {
        let member = UserSummary::new(
            self.job.member_user_id,
            self.email,
            self.given_name,
            self.surname,
        );
        (self.job, member)
    }
}

#[derive(Debug)]
pub struct JobFields {
    pub member_user_id: i32,
    pub required_caregiving_type: String,
    pub other_requirements: Option<String>,
    pub date_posted: Date,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobApplication {
    pub application_id: i32,
    pub caregiver_user_id: i32,
    pub job_id: i32,
    #[serde(with = "iso_date")]
    pub date_applied: Date,
}

/// Application joined with the applicant caregiver and their user.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationWithCaregiverRow {
    #[sqlx(flatten)]
    pub application: JobApplication,
    pub caregiving_type: String,
    pub hourly_rate: f64,
    pub email: String,
    pub given_name: String,
    pub surname: String,
}

impl ApplicationWithCaregiverRow {
    pub fn caregiver(&self) -> UserSummary {
        UserSummary::new(
            self.application.caregiver_user_id,
            self.email.clone(),
            self.given_name.clone(),
            self.surname.clone(),
        )
    }
}

/// Application as listed on a caregiver's page: the job it targets, inline.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationWithJob {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: JobApplication,
    pub required_caregiving_type: String,
    pub member_user_id: i32,
    #[serde(with = "iso_date")]
    pub date_posted: Date,
}
