use serde::Serialize;

/// Row counts shown on the overview page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub users: i64,
    pub caregivers: i64,
    pub members: i64,
    pub jobs: i64,
    pub appointments: i64,
}
