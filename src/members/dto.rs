use serde::{Deserialize, Serialize};

use super::repo_types::{Address, Member, MemberWithUserRow};
use crate::appointments::dto::AppointmentView;
use crate::jobs::repo_types::Job;
use crate::pages::FormAction;
use crate::users::repo_types::UserSummary;

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub user_id: i32,
    #[serde(default)]
    pub house_rules: Option<String>,
    #[serde(default)]
    pub dependent_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub house_rules: Option<String>,
    #[serde(default)]
    pub dependent_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub house_number: String,
    pub street: String,
    pub town: String,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    pub user: UserSummary,
}

impl From<MemberWithUserRow> for MemberView {
    fn from(row: MemberWithUserRow) -> Self {
        let (member, user) = row.into_parts();
        Self { member, user }
    }
}

#[derive(Debug, Serialize)]
pub struct AddressView {
    #[serde(flatten)]
    pub address: Address,
    pub full_address: String,
}

impl From<Address> for AddressView {
    fn from(address: Address) -> Self {
        let full_address = address.full_address();
        Self {
            address,
            full_address,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberDetails {
    #[serde(flatten)]
    pub member: Member,
    pub user: UserSummary,
    pub addresses: Vec<AddressView>,
    pub jobs: Vec<Job>,
    pub appointments: Vec<AppointmentView>,
}

#[derive(Debug, Serialize)]
pub struct MemberForm {
    pub action: FormAction,
    pub member: Option<MemberView>,
    /// Users holding neither role; only filled for the create form.
    pub available_users: Vec<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_view_carries_full_address() {
        let view = AddressView::from(Address {
            address_id: 3,
            member_user_id: 1,
            house_number: "5A".into(),
            street: "Tole Bi".into(),
            town: "Almaty".into(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["full_address"], "5A Tole Bi, Almaty");
        assert_eq!(json["address_id"], 3);
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateMemberRequest = serde_json::from_str("{}").unwrap();
        assert!(req.house_rules.is_none());
        assert!(req.dependent_description.is_none());
    }
}
