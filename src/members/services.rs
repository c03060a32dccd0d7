use tracing::info;

use super::dto::{
    AddressRequest, CreateMemberRequest, MemberDetails, MemberForm, MemberView,
    UpdateMemberRequest,
};
use super::repo;
use super::repo_types::{MemberFields, NewAddress};
use crate::error::{AppError, AppResult};
use crate::pages::FormAction;
use crate::state::AppState;
use crate::validation::{max_len, optional, required};
use crate::{appointments, jobs, users};

pub const RESOURCE: &str = "Member";
pub const ADDRESS: &str = "Address";

fn member_fields(
    house_rules: Option<String>,
    dependent_description: Option<String>,
) -> MemberFields {
    MemberFields {
        house_rules: optional(house_rules),
        dependent_description: optional(dependent_description),
    }
}

fn validate_address(req: &AddressRequest) -> AppResult<NewAddress> {
    let house_number = required("house_number", &req.house_number)?;
    max_len("house_number", &house_number, 20)?;
    let street = required("street", &req.street)?;
    max_len("street", &street, 255)?;
    let town = required("town", &req.town)?;
    max_len("town", &town, 100)?;
    Ok(NewAddress {
        house_number,
        street,
        town,
    })
}

pub async fn list(state: &AppState) -> AppResult<Vec<MemberView>> {
    let mut tx = state.db.begin().await?;
    let rows = repo::list(&mut tx).await?;
    tx.commit().await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn details(state: &AppState, member_id: i32) -> AppResult<MemberDetails> {
    let mut tx = state.db.begin().await?;
    let (member, user) = repo::find(&mut tx, member_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, member_id))?
        .into_parts();
    let addresses = repo::addresses_for(&mut tx, member_id).await?;
    let jobs = jobs::repo::list_for_member(&mut tx, member_id).await?;
    let appointments = appointments::repo::list_for_member(&mut tx, member_id).await?;
    tx.commit().await?;

    Ok(MemberDetails {
        member,
        user,
        addresses: addresses.into_iter().map(Into::into).collect(),
        jobs,
        appointments: appointments.into_iter().map(Into::into).collect(),
    })
}

pub async fn create_form(state: &AppState) -> AppResult<MemberForm> {
    let mut tx = state.db.begin().await?;
    let available_users = users::services::load_available_users(&mut tx).await?;
    tx.commit().await?;
    Ok(MemberForm {
        action: FormAction::Create,
        member: None,
        available_users,
    })
}

pub async fn update_form(state: &AppState, member_id: i32) -> AppResult<MemberForm> {
    let mut tx = state.db.begin().await?;
    let member: MemberView = repo::find(&mut tx, member_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, member_id))?
        .into();
    tx.commit().await?;
    Ok(MemberForm {
        action: FormAction::Update,
        member: Some(member),
        available_users: Vec::new(),
    })
}

pub async fn create(state: &AppState, req: CreateMemberRequest) -> AppResult<i32> {
    let fields = member_fields(req.house_rules, req.dependent_description);

    let mut tx = state.db.begin().await?;
    users::services::ensure_role_free(&mut tx, req.user_id).await?;
    let member = repo::insert(&mut tx, req.user_id, &fields).await?;
    tx.commit().await?;

    info!(member_id = member.member_user_id, "member created");
    Ok(member.member_user_id)
}

pub async fn update(state: &AppState, member_id: i32, req: UpdateMemberRequest) -> AppResult<()> {
    let fields = member_fields(req.house_rules, req.dependent_description);

    let mut tx = state.db.begin().await?;
    repo::update(&mut tx, member_id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, member_id))?;
    tx.commit().await?;

    info!(member_id, "member updated");
    Ok(())
}

pub async fn delete(state: &AppState, member_id: i32) -> AppResult<bool> {
    let mut tx = state.db.begin().await?;
    let deleted = repo::delete(&mut tx, member_id).await?;
    tx.commit().await?;
    if deleted {
        info!(member_id, "member deleted");
    }
    Ok(deleted)
}

pub async fn add_address(state: &AppState, member_id: i32, req: AddressRequest) -> AppResult<i32> {
    let address = validate_address(&req)?;

    let mut tx = state.db.begin().await?;
    if !repo::exists(&mut tx, member_id).await? {
        return Err(AppError::not_found(RESOURCE, member_id));
    }
    let address = repo::insert_address(&mut tx, member_id, &address).await?;
    tx.commit().await?;

    info!(member_id, address_id = address.address_id, "address added");
    Ok(address.address_id)
}

pub async fn remove_address(state: &AppState, member_id: i32, address_id: i32) -> AppResult<()> {
    let mut tx = state.db.begin().await?;
    if !repo::exists(&mut tx, member_id).await? {
        return Err(AppError::not_found(RESOURCE, member_id));
    }
    if !repo::delete_address(&mut tx, member_id, address_id).await? {
        return Err(AppError::not_found(ADDRESS, address_id));
    }
    tx.commit().await?;

    info!(member_id, address_id, "address removed");
    Ok(())
}
