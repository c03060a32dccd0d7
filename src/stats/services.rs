use super::dto::Overview;
use crate::error::AppResult;
use crate::state::AppState;
use crate::{appointments, caregivers, jobs, members, users};

/// Counts are read under REPEATABLE READ, so all five come from one snapshot.
pub async fn overview(state: &AppState) -> AppResult<Overview> {
    let mut tx = state.db.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *tx)
        .await?;
    let overview = Overview {
        users: users::repo::count(&mut tx).await?,
        caregivers: caregivers::repo::count(&mut tx).await?,
        members: members::repo::count(&mut tx).await?,
        jobs: jobs::repo::count(&mut tx).await?,
        appointments: appointments::repo::count(&mut tx).await?,
    };
    tx.commit().await?;
    Ok(overview)
}
