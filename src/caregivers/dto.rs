use serde::{Deserialize, Serialize};

use super::repo_types::{Caregiver, CaregiverWithUserRow, Gender};
use crate::appointments::dto::AppointmentView;
use crate::jobs::repo_types::ApplicationWithJob;
use crate::pages::FormAction;
use crate::users::repo_types::UserSummary;

#[derive(Debug, Deserialize)]
pub struct CreateCaregiverRequest {
    pub user_id: i32,
    #[serde(default)]
    pub photo: Option<String>,
    pub gender: String,
    pub caregiving_type: String,
    pub hourly_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCaregiverRequest {
    #[serde(default)]
    pub photo: Option<String>,
    pub gender: String,
    pub caregiving_type: String,
    pub hourly_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct CaregiverView {
    #[serde(flatten)]
    pub caregiver: Caregiver,
    pub user: UserSummary,
}

impl From<CaregiverWithUserRow> for CaregiverView {
    fn from(row: CaregiverWithUserRow) -> Self {
        let (caregiver, user) = row.into_parts();
        Self { caregiver, user }
    }
}

#[derive(Debug, Serialize)]
pub struct CaregiverDetails {
    #[serde(flatten)]
    pub caregiver: Caregiver,
    pub user: UserSummary,
    pub appointments: Vec<AppointmentView>,
    pub job_applications: Vec<ApplicationWithJob>,
}

#[derive(Debug, Serialize)]
pub struct CaregiverForm {
    pub action: FormAction,
    pub caregiver: Option<CaregiverView>,
    /// Users holding neither role; only filled for the create form.
    pub available_users: Vec<UserSummary>,
    pub genders: Vec<Gender>,
}
