use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub profile_description: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        full_name(&self.given_name, &self.surname)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary::new(
            self.user_id,
            self.email.clone(),
            self.given_name.clone(),
            self.surname.clone(),
        )
    }
}

pub fn full_name(given_name: &str, surname: &str) -> String {
    format!("{} {}", given_name, surname)
}

/// The slice of a user shown next to caregivers, members, jobs and appointments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: i32,
    pub email: String,
    pub full_name: String,
}

impl UserSummary {
    pub fn new(user_id: i32, email: String, given_name: String, surname: String) -> Self {
        Self {
            user_id,
            email,
            full_name: full_name(&given_name, &surname),
        }
    }
}

/// Fields written on insert.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub profile_description: Option<String>,
    pub password_hash: String,
}

/// Fields written on update; `password_hash: None` keeps the stored hash.
#[derive(Debug)]
pub struct UserChanges {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub profile_description: Option<String>,
    pub password_hash: Option<String>,
}
