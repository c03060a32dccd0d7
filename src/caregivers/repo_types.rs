use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;

use crate::users::repo_types::UserSummary;
use crate::validation::InvalidVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or_else(|| InvalidVariant {
                field: "gender",
                value: s.to_string(),
                expected: "Male, Female, Other, Prefer not to say",
            })
    }
}

impl TryFrom<String> for Gender {
    type Error = InvalidVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Caregiver record; `hourly_rate` is selected as `float8`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Caregiver {
    pub caregiver_user_id: i32,
    pub photo: Option<String>,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub caregiving_type: String,
    pub hourly_rate: f64,
}

/// Caregiver joined with the owning user.
#[derive(Debug, Clone, FromRow)]
pub struct CaregiverWithUserRow {
    #[sqlx(flatten)]
    pub caregiver: Caregiver,
    pub email: String,
    pub given_name: String,
    pub surname: String,
}

impl CaregiverWithUserRow {
    pub fn into_parts(self) -> (Caregiver, UserSummary) {
        let user = UserSummary::new(
            self.caregiver.caregiver_user_id,
            self.email,
            self.given_name,
            self.surname,
        );
        (self.caregiver, user)
    }
}

#[derive(Debug)]
pub struct CaregiverFields {
    pub photo: Option<String>,
    pub gender: Gender,
    pub caregiving_type: String,
    pub hourly_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_full_vocabulary() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>().unwrap(), g);
        }
        assert_eq!(
            " Prefer not to say ".parse::<Gender>().unwrap(),
            Gender::PreferNotToSay
        );
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let err = "male".parse::<Gender>().unwrap_err();
        assert_eq!(err.field, "gender");
        assert!(err.to_string().contains("'male'"));
    }

    #[test]
    fn gender_serializes_as_stored() {
        let json = serde_json::to_string(&Gender::PreferNotToSay).unwrap();
        assert_eq!(json, "\"Prefer not to say\"");
    }
}
