use sqlx::PgConnection;

use super::repo_types::{Caregiver, CaregiverFields, CaregiverWithUserRow};

const SELECT_WITH_USER: &str = r#"
    SELECT c.caregiver_user_id, c.photo, c.gender, c.caregiving_type,
           c.hourly_rate::float8 AS hourly_rate,
           u.email, u.given_name, u.surname
      FROM caregivers c
      JOIN users u ON u.user_id = c.caregiver_user_id
"#;

const RETURNING: &str =
    "RETURNING caregiver_user_id, photo, gender, caregiving_type, hourly_rate::float8 AS hourly_rate";

/// All caregivers with their user; the join is 1:1 so each caregiver appears once.
pub async fn list(conn: &mut PgConnection) -> sqlx::Result<Vec<CaregiverWithUserRow>> {
    sqlx::query_as::<_, CaregiverWithUserRow>(&format!(
        "{SELECT_WITH_USER} ORDER BY c.caregiver_user_id"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find(
    conn: &mut PgConnection,
    caregiver_id: i32,
) -> sqlx::Result<Option<CaregiverWithUserRow>> {
    sqlx::query_as::<_, CaregiverWithUserRow>(&format!(
        "{SELECT_WITH_USER} WHERE c.caregiver_user_id = $1"
    ))
    .bind(caregiver_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    user_id: i32,
    fields: &CaregiverFields,
) -> sqlx::Result<Caregiver> {
    sqlx::query_as::<_, Caregiver>(&format!(
        r#"
        INSERT INTO caregivers (caregiver_user_id, photo, gender, caregiving_type, hourly_rate)
        VALUES ($1, $2, $3, $4, $5)
        {RETURNING}
        "#
    ))
    .bind(user_id)
    .bind(&fields.photo)
    .bind(fields.gender.as_str())
    .bind(&fields.caregiving_type)
    .bind(fields.hourly_rate)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    caregiver_id: i32,
    fields: &CaregiverFields,
) -> sqlx::Result<Option<Caregiver>> {
    sqlx::query_as::<_, Caregiver>(&format!(
        r#"
        UPDATE caregivers
           SET photo = $2,
               gender = $3,
               caregiving_type = $4,
               hourly_rate = $5
         WHERE caregiver_user_id = $1
        {RETURNING}
        "#
    ))
    .bind(caregiver_id)
    .bind(&fields.photo)
    .bind(fields.gender.as_str())
    .bind(&fields.caregiving_type)
    .bind(fields.hourly_rate)
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, caregiver_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM caregivers WHERE caregiver_user_id = $1")
        .bind(caregiver_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn ids(conn: &mut PgConnection) -> sqlx::Result<Vec<i32>> {
    sqlx::query_scalar::<_, i32>("SELECT caregiver_user_id FROM caregivers")
        .fetch_all(conn)
        .await
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM caregivers")
        .fetch_one(conn)
        .await
}
