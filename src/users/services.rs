use std::collections::HashSet;

use sqlx::PgConnection;
use tracing::info;

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDetails, UserListItem};
use super::repo;
use super::repo_types::{NewUser, User, UserChanges, UserSummary};
use crate::{caregivers, members};
use crate::error::{AppError, AppResult};
use crate::password::hash_password;
use crate::state::AppState;
use crate::validation::{max_len, normalize_email, optional, required};

pub const RESOURCE: &str = "User";

struct Profile {
    email: String,
    given_name: String,
    surname: String,
    city: Option<String>,
    phone_number: Option<String>,
    profile_description: Option<String>,
}

fn validate_profile(
    email: &str,
    given_name: &str,
    surname: &str,
    city: Option<String>,
    phone_number: Option<String>,
    profile_description: Option<String>,
) -> AppResult<Profile> {
    let email = normalize_email(email)?;
    let given_name = required("given_name", given_name)?;
    max_len("given_name", &given_name, 100)?;
    let surname = required("surname", surname)?;
    max_len("surname", &surname, 100)?;
    let city = optional(city);
    if let Some(city) = &city {
        max_len("city", city, 100)?;
    }
    let phone_number = optional(phone_number);
    if let Some(phone) = &phone_number {
        max_len("phone_number", phone, 20)?;
    }
    Ok(Profile {
        email,
        given_name,
        surname,
        city,
        phone_number,
        profile_description: optional(profile_description),
    })
}

/// Any non-blank password is accepted; it is hashed as typed.
fn validate_password(password: &str) -> AppResult<()> {
    if password.trim().is_empty() {
        return Err(AppError::validation("password is required"));
    }
    Ok(())
}

/// A supplied, non-blank password is hashed; anything else means "keep the
/// current one".
pub(crate) fn replacement_password(password: Option<&str>) -> AppResult<Option<String>> {
    match password.filter(|p| !p.trim().is_empty()) {
        Some(p) => Ok(Some(hash_password(p)?)),
        None => Ok(None),
    }
}

pub async fn list(state: &AppState) -> AppResult<Vec<UserListItem>> {
    let mut tx = state.db.begin().await?;
    let users = repo::list(&mut tx).await?;
    tx.commit().await?;
    Ok(users.into_iter().map(UserListItem::from).collect())
}

pub async fn get(state: &AppState, user_id: i32) -> AppResult<User> {
    let mut tx = state.db.begin().await?;
    let user = repo::find(&mut tx, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, user_id))?;
    tx.commit().await?;
    Ok(user)
}

pub async fn details(state: &AppState, user_id: i32) -> AppResult<UserDetails> {
    let mut tx = state.db.begin().await?;
    let user = repo::find(&mut tx, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, user_id))?;
    let (is_caregiver, is_member) = repo::roles(&mut tx, user_id).await?;
    tx.commit().await?;

    let full_name = user.full_name();
    Ok(UserDetails {
        user,
        full_name,
        is_caregiver,
        is_member,
    })
}

pub async fn create(state: &AppState, req: CreateUserRequest) -> AppResult<User> {
    let profile = validate_profile(
        &req.email,
        &req.given_name,
        &req.surname,
        req.city,
        req.phone_number,
        req.profile_description,
    )?;
    validate_password(&req.password)?;
    let password_hash = hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;
    let user = repo::insert(
        &mut tx,
        &NewUser {
            email: profile.email,
            given_name: profile.given_name,
            surname: profile.surname,
            city: profile.city,
            phone_number: profile.phone_number,
            profile_description: profile.profile_description,
            password_hash,
        },
    )
    .await?;
    tx.commit().await?;

    info!(user_id = user.user_id, "user created");
    Ok(user)
}

pub async fn update(state: &AppState, user_id: i32, req: UpdateUserRequest) -> AppResult<User> {
    let profile = validate_profile(
        &req.email,
        &req.given_name,
        &req.surname,
        req.city,
        req.phone_number,
        req.profile_description,
    )?;
    let password_hash = replacement_password(req.password.as_deref())?;

    let mut tx = state.db.begin().await?;
    let user = repo::update(
        &mut tx,
        user_id,
        &UserChanges {
            email: profile.email,
            given_name: profile.given_name,
            surname: profile.surname,
            city: profile.city,
            phone_number: profile.phone_number,
            profile_description: profile.profile_description,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found(RESOURCE, user_id))?;
    tx.commit().await?;

    info!(user_id, "user updated");
    Ok(user)
}

/// Returns `false` when there was nothing to delete.
pub async fn delete(state: &AppState, user_id: i32) -> AppResult<bool> {
    let mut tx = state.db.begin().await?;
    let deleted = repo::delete(&mut tx, user_id).await?;
    tx.commit().await?;
    if deleted {
        info!(user_id, "user deleted");
    }
    Ok(deleted)
}

/// Users that hold neither role: everyone minus the union of caregiver and
/// member ids, in the order the users were given.
pub fn available_users(
    users: Vec<User>,
    caregiver_ids: &[i32],
    member_ids: &[i32],
) -> Vec<UserSummary> {
    let taken: HashSet<i32> = caregiver_ids.iter().chain(member_ids).copied().collect();
    users
        .iter()
        .filter(|u| !taken.contains(&u.user_id))
        .map(User::summary)
        .collect()
}

pub async fn load_available_users(conn: &mut PgConnection) -> sqlx::Result<Vec<UserSummary>> {
    let users = repo::list(&mut *conn).await?;
    let caregiver_ids = caregivers::repo::ids(&mut *conn).await?;
    let member_ids = members::repo::ids(&mut *conn).await?;
    Ok(available_users(users, &caregiver_ids, &member_ids))
}

/// Checked inside the role-creating transaction: the user must exist and
/// hold no role yet. The user row stays locked until that transaction ends,
/// so a concurrent role create for the same user waits and then sees this one.
pub async fn ensure_role_free(conn: &mut PgConnection, user_id: i32) -> AppResult<()> {
    if !repo::lock(&mut *conn, user_id).await? {
        return Err(AppError::validation(format!("user {user_id} does not exist")));
    }
    match repo::roles(&mut *conn, user_id).await? {
        (true, _) => Err(AppError::Conflict(format!(
            "user {user_id} is already a caregiver"
        ))),
        (_, true) => Err(AppError::Conflict(format!("user {user_id} is already a member"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::matches_hash;

    #[test]
    fn profile_is_normalized() {
        let p = validate_profile(
            " Aigerim@Mail.KZ ",
            " Aigerim ",
            "Nurlanova",
            Some("  ".into()),
            Some("+77011234567".into()),
            None,
        )
        .unwrap();
        assert_eq!(p.email, "aigerim@mail.kz");
        assert_eq!(p.given_name, "Aigerim");
        assert_eq!(p.city, None);
        assert_eq!(p.phone_number.as_deref(), Some("+77011234567"));
    }

    #[test]
    fn profile_requires_names() {
        let err = validate_profile("a@b.co", "", "X", None, None, None)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "given_name is required");
    }

    #[test]
    fn overlong_phone_is_rejected() {
        let err = validate_profile("a@b.co", "A", "B", None, Some("1".repeat(21)), None)
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn blank_password_keeps_current() {
        assert!(replacement_password(None).unwrap().is_none());
        assert!(replacement_password(Some("")).unwrap().is_none());
        assert!(replacement_password(Some("   ")).unwrap().is_none());
    }

    #[test]
    fn new_password_is_hashed() {
        let hash = replacement_password(Some("new-password-1")).unwrap().unwrap();
        assert!(matches_hash("new-password-1", &hash));
    }

    #[test]
    fn short_password_is_accepted() {
        let hash = replacement_password(Some("abc")).unwrap().unwrap();
        assert!(matches_hash("abc", &hash));
        assert!(validate_password("abc").is_ok());
    }

    #[test]
    fn blank_password_is_required_on_create() {
        let err = validate_password("   ").unwrap_err();
        assert_eq!(err.to_string(), "password is required");
    }

    fn user(user_id: i32) -> User {
        let now = time::OffsetDateTime::now_utc();
        User {
            user_id,
            email: format!("user{user_id}@example.com"),
            given_name: format!("Given{user_id}"),
            surname: "Tester".into(),
            city: None,
            phone_number: None,
            profile_description: None,
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn role_holders_are_not_available() {
        let users = (1..=6).map(user).collect();
        let available = available_users(users, &[2, 5], &[3]);
        let ids: Vec<i32> = available.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![1, 4, 6]);
        assert_eq!(available[0].full_name, "Given1 Tester");
    }

    #[test]
    fn overlapping_role_ids_are_handled() {
        // the database does not stop one user holding both roles
        let users = (1..=3).map(user).collect();
        let available = available_users(users, &[1, 2], &[2]);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].user_id, 3);
    }

    #[test]
    fn everyone_available_without_roles() {
        let users = (1..=3).map(user).collect();
        assert_eq!(available_users(users, &[], &[]).len(), 3);
    }
}
