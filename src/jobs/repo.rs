use sqlx::PgConnection;
use time::Date;

use super::repo_types::{
    ApplicationWithCaregiverRow, ApplicationWithJob, Job, JobApplication, JobFields,
    JobWithMemberRow,
};

const SELECT_WITH_MEMBER: &str = r#"
    SELECT j.job_id, j.member_user_id, j.required_caregiving_type,
           j.other_requirements, j.date_posted,
           u.email, u.given_name, u.surname
      FROM jobs j
      JOIN users u ON u.user_id = j.member_user_id
"#;

const JOB_COLUMNS: &str =
    "job_id, member_user_id, required_caregiving_type, other_requirements, date_posted";

pub async fn list(conn: &mut PgConnection) -> sqlx::Result<Vec<JobWithMemberRow>> {
    sqlx::query_as::<_, JobWithMemberRow>(&format!(
        "{SELECT_WITH_MEMBER} ORDER BY j.date_posted DESC, j.job_id DESC"
    ))
    .fetch_all(conn)
    .await
}

pub async fn find(conn: &mut PgConnection, job_id: i32) -> sqlx::Result<Option<JobWithMemberRow>> {
    sqlx::query_as::<_, JobWithMemberRow>(&format!("{SELECT_WITH_MEMBER} WHERE j.job_id = $1"))
        .bind(job_id)
        .fetch_optional(conn)
        .await
}

pub async fn exists(conn: &mut PgConnection, job_id: i32) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM jobs WHERE job_id = $1)")
        .bind(job_id)
        .fetch_one(conn)
        .await
}

pub async fn list_for_member(conn: &mut PgConnection, member_id: i32) -> sqlx::Result<Vec<Job>> {
    sqlx::query_as::<_, Job>(&format!(
        "SELECT {JOB_COLUMNS} FROM jobs WHERE member_user_id = $1 ORDER BY date_posted DESC, job_id DESC"
    ))
    .bind(member_id)
    .fetch_all(conn)
    .await
}

pub async fn insert(conn: &mut PgConnection, fields: &JobFields) -> sqlx::Result<Job> {
    sqlx::query_as::<_, Job>(&format!(
        r#"
        INSERT INTO jobs (member_user_id, required_caregiving_type, other_requirements, date_posted)
        VALUES ($1, $2, $3, $4)
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(fields.member_user_id)
    .bind(&fields.required_caregiving_type)
    .bind(&fields.other_requirements)
    .bind(fields.date_posted)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    job_id: i32,
    fields: &JobFields,
) -> sqlx::Result<Option<Job>> {
    sqlx::query_as::<_, Job>(&format!(
        r#"
        UPDATE jobs
           SET member_user_id = $2,
               required_caregiving_type = $3,
               other_requirements = $4,
               date_posted = $5
         WHERE job_id = $1
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(job_id)
    .bind(fields.member_user_id)
    .bind(&fields.required_caregiving_type)
    .bind(&fields.other_requirements)
    .bind(fields.date_posted)
    .fetch_optional(conn)
    .await
}

pub async fn delete(conn: &mut PgConnection, job_id: i32) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM jobs WHERE job_id = $1")
        .bind(job_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
        .fetch_one(conn)
        .await
}

pub async fn applications_for_job(
    conn: &mut PgConnection,
    job_id: i32,
) -> sqlx::Result<Vec<ApplicationWithCaregiverRow>> {
    sqlx::query_as::<_, ApplicationWithCaregiverRow>(
        r#"
        SELECT a.application_id, a.caregiver_user_id, a.job_id, a.date_applied,
               c.caregiving_type, c.hourly_rate::float8 AS hourly_rate,
               u.email, u.given_name, u.surname
          FROM job_applications a
          JOIN caregivers c ON c.caregiver_user_id = a.caregiver_user_id
          JOIN users u ON u.user_id = c.caregiver_user_id
         WHERE a.job_id = $1
         ORDER BY a.date_applied, a.application_id
        "#,
    )
    .bind(job_id)
    .fetch_all(conn)
    .await
}

pub async fn applications_for_caregiver(
    conn: &mut PgConnection,
    caregiver_id: i32,
) -> sqlx::Result<Vec<ApplicationWithJob>> {
    sqlx::query_as::<_, ApplicationWithJob>(
        r#"
        SELECT a.application_id, a.caregiver_user_id, a.job_id, a.date_applied,
               j.required_caregiving_type, j.member_user_id, j.date_posted
          FROM job_applications a
          JOIN jobs j ON j.job_id = a.job_id
         WHERE a.caregiver_user_id = $1
         ORDER BY a.date_applied DESC, a.application_id DESC
        "#,
    )
    .bind(caregiver_id)
    .fetch_all(conn)
    .await
}

pub async fn insert_application(
    conn: &mut PgConnection,
    job_id: i32,
    caregiver_id: i32,
    date_applied: Date,
) -> sqlx::Result<JobApplication> {
    sqlx::query_as::<_, JobApplication>(
        r#"
        INSERT INTO job_applications (caregiver_user_id, job_id, date_applied)
        VALUES ($1, $2, $3)
        RETURNING application_id, caregiver_user_id, job_id, date_applied
        "#,
    )
    .bind(caregiver_id)
    .bind(job_id)
    .bind(date_applied)
    .fetch_one(conn)
    .await
}

pub async fn delete_application(
    conn: &mut PgConnection,
    job_id: i32,
    application_id: i32,
) -> sqlx::Result<bool> {
    let result =
        sqlx::query("DELETE FROM job_applications WHERE application_id = $1 AND job_id = $2")
            .bind(application_id)
            .bind(job_id)
            .execute(conn)
            .await?;
    Ok(result.rows_affected() > 0)
}
