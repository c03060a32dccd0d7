use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{ApplicationWithCaregiverRow, Job, JobApplication, JobWithMemberRow};
use crate::members::dto::MemberView;
use crate::pages::FormAction;
use crate::users::repo_types::UserSummary;
use crate::validation::iso_date;

/// Body of both create and update.
#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub member_user_id: i32,
    pub required_caregiving_type: String,
    #[serde(default)]
    pub other_requirements: Option<String>,
    #[serde(with = "iso_date")]
    pub date_posted: Date,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub caregiver_user_id: i32,
    /// Missing means today (UTC).
    #[serde(default, with = "iso_date::option")]
    pub date_applied: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub member: UserSummary,
}

impl From<JobWithMemberRow> for JobView {
    fn from(row: JobWithMemberRow) -> Self {
        let (job, member) = row.into_parts();
        Self { job, member }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicantView {
    #[serde(flatten)]
    pub application: JobApplication,
    pub caregiver: UserSummary,
    pub caregiving_type: String,
    pub hourly_rate: f64,
}

impl From<ApplicationWithCaregiverRow> for ApplicantView {
    fn from(row: ApplicationWithCaregiverRow) -> Self {
        let caregiver = row.caregiver();
        Self {
            application: row.application,
            caregiver,
            caregiving_type: row.caregiving_type,
            hourly_rate: row.hourly_rate,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobDetails {
    #[serde(flatten)]
    pub job: Job,
    pub member: UserSummary,
    pub applications: Vec<ApplicantView>,
}

#[derive(Debug, Serialize)]
pub struct JobForm {
    pub action: FormAction,
    pub job: Option<JobView>,
    pub members: Vec<MemberView>,
}
