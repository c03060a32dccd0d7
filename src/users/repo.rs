use sqlx::PgConnection;

use super::repo_types::{NewUser, User, UserChanges};

const USER_COLUMNS: &str = r#"
    user_id, email, given_name, surname, city, phone_number,
    profile_description, password_hash, created_at, updated_at
"#;

pub async fn list(conn: &mut PgConnection) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find(conn: &mut PgConnection, user_id: i32) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert(conn: &mut PgConnection, new: &NewUser) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, given_name, surname, city, phone_number,
                           profile_description, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&new.email)
    .bind(&new.given_name)
    .bind(&new.surname)
    .bind(&new.city)
    .bind(&new.phone_number)
    .bind(&new.profile_description)
    .bind(&new.password_hash)
    .fetch_one(conn)
    .await
}

/// Overwrites the profile; returns `None` when the user does not exist.
pub async fn update(
    conn: &mut PgConnection,
    user_id: i32,
    changes: &UserChanges,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
           SET email = $2,
               given_name = $3,
               surname = $4,
               city = $5,
               phone_number = $6,
               profile_description = $7,
               password_hash = COALESCE($8, password_hash),
               updated_at = NOW()
         WHERE user_id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&changes.email)
    .bind(&changes.given_name)
    .bind(&changes.surname)
    .bind(&changes.city)
    .bind(&changes.phone_number)
    .bind(&changes.profile_description)
    .bind(&changes.password_hash)
    .fetch_optional(conn)
    .await
}

/// Deletes the user; caregiver/member rows and everything below them go
/// with it through the cascading foreign keys.
pub async fn delete(conn: &mut PgConnection, user_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Takes a row lock on the user for the rest of the transaction; `false`
/// when there is no such user.
pub async fn lock(conn: &mut PgConnection, user_id: i32) -> sqlx::Result<bool> {
    let locked = sqlx::query_scalar::<_, i32>(
        "SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_optional(conn)
    .await?;
    Ok(locked.is_some())
}

/// Which roles the user holds: `(is_caregiver, is_member)`.
pub async fn roles(conn: &mut PgConnection, user_id: i32) -> sqlx::Result<(bool, bool)> {
    sqlx::query_as::<_, (bool, bool)>(
        r#"
        SELECT EXISTS (SELECT 1 FROM caregivers WHERE caregiver_user_id = $1),
               EXISTS (SELECT 1 FROM members WHERE member_user_id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(conn)
    .await
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(conn)
        .await
}
