//! Service-level scenarios against a real Postgres.
//!
//! Run with `DATABASE_URL` pointing at a server where the test user may
//! create databases, then `cargo test -- --ignored`.

use std::sync::Arc;

use sqlx::PgPool;
use time::macros::{date, time};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use carematch::app::build_app;
use carematch::appointments::dto::{CreateAppointmentRequest, UpdateAppointmentRequest};
use carematch::appointments::repo_types::AppointmentStatus;
use carematch::caregivers::dto::{CreateCaregiverRequest, UpdateCaregiverRequest};
use carematch::config::{AppConfig, ServerConfig};
use carematch::error::AppError;
use carematch::jobs::dto::{ApplyRequest, JobRequest};
use carematch::members::dto::{AddressRequest, CreateMemberRequest, UpdateMemberRequest};
use carematch::state::AppState;
use carematch::users::dto::{CreateUserRequest, UpdateUserRequest};
use carematch::{appointments, caregivers, jobs, members, stats, users};

fn state(pool: PgPool) -> AppState {
    let config = AppConfig {
        database_url: String::new(),
        max_connections: 1,
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
    };
    AppState::from_parts(pool, Arc::new(config))
}

async fn user(state: &AppState, email: &str) -> anyhow::Result<i32> {
    let user = users::services::create(
        state,
        CreateUserRequest {
            email: email.into(),
            given_name: "Test".into(),
            surname: email.split('@').next().unwrap_or("user").into(),
            city: Some("Astana".into()),
            phone_number: None,
            profile_description: None,
            password: "correct horse".into(),
        },
    )
    .await?;
    Ok(user.user_id)
}

async fn caregiver(state: &AppState, email: &str, rate: f64) -> anyhow::Result<i32> {
    let user_id = user(state, email).await?;
    let id = caregivers::services::create(
        state,
        CreateCaregiverRequest {
            user_id,
            photo: None,
            gender: "Female".into(),
            caregiving_type: "Elderly Care".into(),
            hourly_rate: rate,
        },
    )
    .await?;
    Ok(id)
}

async fn member(state: &AppState, email: &str) -> anyhow::Result<i32> {
    let user_id = user(state, email).await?;
    let id = members::services::create(
        state,
        CreateMemberRequest {
            user_id,
            house_rules: Some("No smoking".into()),
            dependent_description: Some("Grandfather, 80".into()),
        },
    )
    .await?;
    Ok(id)
}

async fn appointment(
    state: &AppState,
    caregiver_id: i32,
    member_id: i32,
    hours: f64,
) -> anyhow::Result<i32> {
    let id = appointments::services::create(
        state,
        CreateAppointmentRequest {
            caregiver_user_id: caregiver_id,
            member_user_id: member_id,
            appointment_date: date!(2025 - 03 - 10),
            appointment_time: time!(9:30),
            work_hours: hours,
            status: None,
        },
    )
    .await?;
    Ok(id)
}

async fn job(state: &AppState, member_id: i32) -> anyhow::Result<i32> {
    let id = jobs::services::create(
        state,
        JobRequest {
            member_user_id: member_id,
            required_caregiving_type: "Elderly Care".into(),
            other_requirements: None,
            date_posted: date!(2025 - 03 - 01),
        },
    )
    .await?;
    Ok(id)
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn deleting_a_user_cascades_through_roles(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "nurse@example.com", 20.0).await?;
    let mb = member(&state, "family@example.com").await?;
    appointment(&state, cg, mb, 2.0).await?;
    let job_id = job(&state, mb).await?;
    jobs::services::apply(
        &state,
        job_id,
        ApplyRequest {
            caregiver_user_id: cg,
            date_applied: None,
        },
    )
    .await?;

    assert!(users::services::delete(&state, cg).await?);

    assert!(appointments::services::list(&state).await?.is_empty());
    let job = jobs::services::details(&state, job_id).await?;
    assert!(job.applications.is_empty());
    assert!(matches!(
        caregivers::services::details(&state, cg).await,
        Err(AppError::NotFound { .. })
    ));

    let overview = stats::services::overview(&state).await?;
    assert_eq!(overview.users, 1);
    assert_eq!(overview.caregivers, 0);
    assert_eq!(overview.members, 1);
    assert_eq!(overview.jobs, 1);
    assert_eq!(overview.appointments, 0);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn total_cost_uses_current_rate(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "rate@example.com", 25.5).await?;
    let mb = member(&state, "client@example.com").await?;
    let id = appointment(&state, cg, mb, 3.0).await?;

    let view = appointments::services::details(&state, id).await?;
    assert_eq!(view.total_cost, 76.5);
    assert_eq!(view.caregiver.user_id, cg);
    assert_eq!(view.member.user_id, mb);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn create_form_offers_only_users_without_a_role(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    caregiver(&state, "taken1@example.com", 10.0).await?;
    member(&state, "taken2@example.com").await?;
    let free = user(&state, "free@example.com").await?;

    let form = caregivers::services::create_form(&state).await?;
    let ids: Vec<i32> = form.available_users.iter().map(|u| u.user_id).collect();
    assert_eq!(ids, vec![free]);

    let form = members::services::create_form(&state).await?;
    assert_eq!(form.available_users.len(), 1);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn a_user_holds_at_most_one_role(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "both@example.com", 10.0).await?;

    let err = members::services::create(
        &state,
        CreateMemberRequest {
            user_id: cg,
            house_rules: None,
            dependent_description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = members::services::create(
        &state,
        CreateMemberRequest {
            user_id: 9999,
            house_rules: None,
            dependent_description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn duplicate_email_conflicts(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    user(&state, "same@example.com").await?;
    let err = user(&state, "SAME@example.com").await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(matches!(err, AppError::Conflict(ref m) if m == "Email already registered"));
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn blank_password_keeps_current_hash(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let id = user(&state, "keep@example.com").await?;
    let before = users::services::get(&state, id).await?;

    let updated = users::services::update(
        &state,
        id,
        UpdateUserRequest {
            email: "keep@example.com".into(),
            given_name: "Renamed".into(),
            surname: "Person".into(),
            city: None,
            phone_number: None,
            profile_description: None,
            password: Some("".into()),
        },
    )
    .await?;

    assert_eq!(updated.given_name, "Renamed");
    assert_eq!(updated.password_hash, before.password_hash);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn lists_do_not_repeat_rows(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "busy@example.com", 15.0).await?;
    let mb = member(&state, "home@example.com").await?;
    for hours in [1.0, 2.0, 3.0] {
        appointment(&state, cg, mb, hours).await?;
    }

    assert_eq!(caregivers::services::list(&state).await?.len(), 1);
    assert_eq!(members::services::list(&state).await?.len(), 1);
    assert_eq!(appointments::services::list(&state).await?.len(), 3);

    let details = caregivers::services::details(&state, cg).await?;
    assert_eq!(details.appointments.len(), 3);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn deleting_missing_rows_reports_false(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    assert!(!users::services::delete(&state, 42).await?);
    assert!(!jobs::services::delete(&state, 42).await?);
    assert!(!appointments::services::delete(&state, 42).await?);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn addresses_belong_to_their_member(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let owner = member(&state, "owner@example.com").await?;
    let other = member(&state, "other@example.com").await?;
    let address_id = members::services::add_address(
        &state,
        owner,
        AddressRequest {
            house_number: "12".into(),
            street: "Abay Ave".into(),
            town: "Astana".into(),
        },
    )
    .await?;

    let details = members::services::details(&state, owner).await?;
    assert_eq!(details.addresses.len(), 1);
    assert_eq!(details.addresses[0].full_address, "12 Abay Ave, Astana");

    let err = members::services::remove_address(&state, other, address_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    members::services::remove_address(&state, owner, address_id).await?;
    assert!(members::services::details(&state, owner)
        .await?
        .addresses
        .is_empty());
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn job_for_unknown_member_is_a_validation_error(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let err = job(&state, 777).await.unwrap_err().downcast::<AppError>()?;
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn applications_show_on_both_sides(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "applicant@example.com", 12.0).await?;
    let mb = member(&state, "poster@example.com").await?;
    let job_id = job(&state, mb).await?;
    let application_id = jobs::services::apply(
        &state,
        job_id,
        ApplyRequest {
            caregiver_user_id: cg,
            date_applied: Some(date!(2025 - 03 - 02)),
        },
    )
    .await?;

    let job = jobs::services::details(&state, job_id).await?;
    assert_eq!(job.applications.len(), 1);
    assert_eq!(job.applications[0].caregiver.user_id, cg);

    let caregiver = caregivers::services::details(&state, cg).await?;
    assert_eq!(caregiver.job_applications.len(), 1);
    assert_eq!(caregiver.job_applications[0].application.job_id, job_id);

    jobs::services::withdraw(&state, job_id, application_id).await?;
    assert!(jobs::services::details(&state, job_id)
        .await?
        .applications
        .is_empty());
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn concurrent_role_creates_grant_one_role(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    for n in 0..10 {
        let user_id = user(&state, &format!("racer{n}@example.com")).await?;
        let (as_caregiver, as_member) = tokio::join!(
            caregivers::services::create(
                &state,
                CreateCaregiverRequest {
                    user_id,
                    photo: None,
                    gender: "Other".into(),
                    caregiving_type: "Babysitter".into(),
                    hourly_rate: 10.0,
                },
            ),
            members::services::create(
                &state,
                CreateMemberRequest {
                    user_id,
                    house_rules: None,
                    dependent_description: None,
                },
            ),
        );

        assert!(
            as_caregiver.is_ok() != as_member.is_ok(),
            "user {user_id}: exactly one role create must succeed"
        );
        let loser = as_caregiver.err().or(as_member.err());
        assert!(matches!(loser, Some(AppError::Conflict(_))));

        let details = users::services::details(&state, user_id).await?;
        assert!(details.is_caregiver != details.is_member);
    }
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn caregiver_rate_change_reprices_appointments(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "reprice@example.com", 10.0).await?;
    let mb = member(&state, "payer@example.com").await?;
    let id = appointment(&state, cg, mb, 2.0).await?;
    assert_eq!(appointments::services::details(&state, id).await?.total_cost, 20.0);

    caregivers::services::update(
        &state,
        cg,
        UpdateCaregiverRequest {
            photo: Some("nurse.png".into()),
            gender: "Prefer not to say".into(),
            caregiving_type: "Night Care".into(),
            hourly_rate: 12.5,
        },
    )
    .await?;

    let details = caregivers::services::details(&state, cg).await?;
    assert_eq!(details.caregiver.hourly_rate, 12.5);
    assert_eq!(details.caregiver.caregiving_type, "Night Care");
    assert_eq!(details.caregiver.photo.as_deref(), Some("nurse.png"));
    assert_eq!(appointments::services::details(&state, id).await?.total_cost, 25.0);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn appointment_update_changes_status_and_hours(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "shift@example.com", 20.0).await?;
    let mb = member(&state, "house@example.com").await?;
    let id = appointment(&state, cg, mb, 2.0).await?;
    assert_eq!(
        appointments::services::details(&state, id).await?.appointment.status,
        AppointmentStatus::Scheduled
    );

    appointments::services::update(
        &state,
        id,
        UpdateAppointmentRequest {
            caregiver_user_id: cg,
            member_user_id: mb,
            appointment_date: date!(2025 - 03 - 11),
            appointment_time: time!(14:00),
            work_hours: 4.0,
            status: "Completed".into(),
        },
    )
    .await?;

    let view = appointments::services::details(&state, id).await?;
    assert_eq!(view.appointment.status, AppointmentStatus::Completed);
    assert_eq!(view.appointment.appointment_date, date!(2025 - 03 - 11));
    assert_eq!(view.appointment.appointment_time, time!(14:00));
    assert_eq!(view.total_cost, 80.0);

    let err = appointments::services::update(
        &state,
        id,
        UpdateAppointmentRequest {
            caregiver_user_id: cg,
            member_user_id: mb,
            appointment_date: date!(2025 - 03 - 11),
            appointment_time: time!(14:00),
            work_hours: 4.0,
            status: "Finished".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn member_update_overwrites_both_fields(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let mb = member(&state, "rules@example.com").await?;

    members::services::update(
        &state,
        mb,
        UpdateMemberRequest {
            house_rules: Some("Shoes off at the door".into()),
            dependent_description: Some(" ".into()),
        },
    )
    .await?;

    let details = members::services::details(&state, mb).await?;
    assert_eq!(details.member.house_rules.as_deref(), Some("Shoes off at the door"));
    assert!(details.member.dependent_description.is_none());
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn update_forms_for_missing_rows_are_not_found(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    assert!(matches!(
        caregivers::services::update_form(&state, 404).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        members::services::update_form(&state, 404).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        jobs::services::form(&state, Some(404)).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        appointments::services::form(&state, Some(404)).await,
        Err(AppError::NotFound { .. })
    ));

    let res = build_app(state)
        .oneshot(Request::builder().uri("/api/v1/users/404/update").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test(migrator = "carematch::db::MIGRATOR")]
#[ignore = "requires postgres (DATABASE_URL)"]
async fn overview_counts_over_http(pool: PgPool) -> anyhow::Result<()> {
    let state = state(pool);
    let cg = caregiver(&state, "count-cg@example.com", 10.0).await?;
    let mb = member(&state, "count-mb@example.com").await?;
    user(&state, "count-free@example.com").await?;
    appointment(&state, cg, mb, 1.0).await?;
    job(&state, mb).await?;

    for uri in ["/api/v1", "/api/v1/", "/api/v1/stats"] {
        let res = build_app(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        let body = to_bytes(res.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(json["users"], 3);
        assert_eq!(json["caregivers"], 1);
        assert_eq!(json["members"], 1);
        assert_eq!(json["jobs"], 1);
        assert_eq!(json["appointments"], 1);
    }
    Ok(())
}
