use sqlx::PgConnection;

use super::repo_types::{Appointment, AppointmentFields, AppointmentWithPartiesRow};

/// Both parties are 1:1 joins, so every appointment yields exactly one row.
const SELECT_WITH_PARTIES: &str = r#"
    SELECT a.appointment_id, a.caregiver_user_id, a.member_user_id,
           a.appointment_date, a.appointment_time,
           a.work_hours::float8 AS work_hours, a.status,
           c.hourly_rate::float8 AS hourly_rate,
           cu.email AS caregiver_email,
           cu.given_name AS caregiver_given_name,
           cu.surname AS caregiver_surname,
           mu.email AS member_email,
           mu.given_name AS member_given_name,
           mu.surname AS member_surname
      FROM appointments a
      JOIN caregivers c ON c.caregiver_user_id = a.caregiver_user_id
      JOIN users cu ON cu.user_id = c.caregiver_user_id
      JOIN users mu ON mu.user_id = a.member_user_id
"#;

const RETURNING: &str = r#"
    RETURNING appointment_id, caregiver_user_id, member_user_id, appointment_date,
              appointment_time, work_hours::float8 AS work_hours, status
"#;

pub async fn list(conn: &mut PgConnection) -> sqlx::Result<Vec<AppointmentWithPartiesRow>> {
    sqlx::query_as::<_, AppointmentWithPartiesRow>(&format!(
        "{SELECT_WITH_PARTIES} ORDER BY a.appointment_date, a.appointment_time, a.appointment_id"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find(
    conn: &mut PgConnection,
    appointment_id: i32,
) -> sqlx::Result<Option<AppointmentWithPartiesRow>> {
    sqlx::query_as::<_, AppointmentWithPartiesRow>(&format!(
        "{SELECT_WITH_PARTIES} WHERE a.appointment_id = $1"
    ))
    .bind(appointment_id)
    .fetch_optional(conn)
    .await
}

pub async fn list_for_caregiver(
    conn: &mut PgConnection,
    caregiver_id: i32,
) -> sqlx::Result<Vec<AppointmentWithPartiesRow>> {
    sqlx::query_as::<_, AppointmentWithPartiesRow>(&format!(
        "{SELECT_WITH_PARTIES} WHERE a.caregiver_user_id = $1
         ORDER BY a.appointment_date, a.appointment_time"
    ))
    .bind(caregiver_id)
    .fetch_all(conn)
    .await
}

pub async fn list_for_member(
    conn: &mut PgConnection,
    member_id: i32,
) -> sqlx::Result<Vec<AppointmentWithPartiesRow>> {
    sqlx::query_as::<_, AppointmentWithPartiesRow>(&format!(
        "{SELECT_WITH_PARTIES} WHERE a.member_user_id = $1
         ORDER BY a.appointment_date, a.appointment_time"
    ))
    .bind(member_id)
    .fetch_all(conn)
    .await
}

pub async fn insert(
    conn: &mut PgConnection,
    fields: &AppointmentFields,
) -> sqlx::Result<Appointment> {
    sqlx::query_as::<_, Appointment>(&format!(
        r#"
        INSERT INTO appointments (caregiver_user_id, member_user_id, appointment_date,
                                  appointment_time, work_hours, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        {RETURNING}
        "#
    ))
    .bind(fields.caregiver_user_id)
    .bind(fields.member_user_id)
    .bind(fields.appointment_date)
    .bind(fields.appointment_time)
    .bind(fields.work_hours)
    .bind(fields.status.as_str())
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    appointment_id: i32,
    fields: &AppointmentFields,
) -> sqlx::Result<Option<Appointment>> {
    sqlx::query_as::<_, Appointment>(&format!(
        r#"
        UPDATE appointments
           SET caregiver_user_id = $2,
               member_user_id = $3,
               appointment_date = $4,
               appointment_time = $5,
               work_hours = $6,
               status = $7
         WHERE appointment_id = $1
        {RETURNING}
        "#
    ))
    .bind(appointment_id)
    .bind(fields.caregiver_user_id)
    .bind(fields.member_user_id)
    .bind(fields.appointment_date)
    .bind(fields.appointment_time)
    .bind(fields.work_hours)
    .bind(fields.status.as_str())
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, appointment_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = $1")
        .bind(appointment_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
        .fetch_one(conn)
        .await
}
