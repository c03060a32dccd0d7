use serde::{Deserialize, Serialize};

use super::repo_types::User;
use crate::pages::FormAction;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_description: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_description: Option<String>,
    /// Blank or missing leaves the current password in place.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListItem {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
}

impl From<User> for UserListItem {
    fn from(user: User) -> Self {
        let full_name = user.full_name();
        Self { user, full_name }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub is_caregiver: bool,
    pub is_member: bool,
}

#[derive(Debug, Serialize)]
pub struct UserForm {
    pub action: FormAction,
    pub user: Option<User>,
}
