use serde::Serialize;
use sqlx::FromRow;

use crate::users::repo_types::UserSummary;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Member {
    pub member_user_id: i32,
    pub house_rules: Option<String>,
    pub dependent_description: Option<String>,
}

/// Member joined with the owning user.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserRow {
    #[sqlx(flatten)]
    pub member: Member,
    pub email: String,
    pub given_name: String,
    pub surname: String,
}

impl MemberWithUserRow {
    pub fn into_parts(self) -> (Member, UserSummary) {
        let user = UserSummary::new(
            self.member.member_user_id,
            self.email,
            self.given_name,
            self.surname,
        );
        (self.member, user)
    }
}

#[derive(Debug)]
pub struct MemberFields {
    pub house_rules: Option<String>,
    pub dependent_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    pub address_id: i32,
    pub member_user_id: i32,
    pub house_number: String,
    pub street: String,
    pub town: String,
}

impl Address {
    /// `"12 High Street, Almaty"`
    pub fn full_address(&self) -> String {
        format!("{} {}, {}", self.house_number, self.street, self.town)
    }
}

#[derive(Debug)]
pub struct NewAddress {
    pub house_number: String,
    pub street: String,
    pub town: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address_joins_parts() {
        let address = Address {
            address_id: 1,
            member_user_id: 2,
            house_number: "12".into(),
            street: "Abay Ave".into(),
            town: "Astana".into(),
        };
        assert_eq!(address.full_address(), "12 Abay Ave, Astana");
    }

    #[test]
    fn member_row_splits_into_user_summary() {
        let row = MemberWithUserRow {
            member: Member {
                member_user_id: 7,
                house_rules: Some("No shoes".into()),
                dependent_description: None,
            },
            email: "amina@example.com".into(),
            given_name: "Amina".into(),
            surname: "Sadykova".into(),
        };
        let (member, user) = row.into_parts();
        assert_eq!(member.member_user_id, 7);
        assert_eq!(user.user_id, 7);
        assert_eq!(user.full_name, "Amina Sadykova");
    }
}
