use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One ranked program choice of an application. Lower priority is more preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Preference {
    pub preference_id: i64,
    pub application_id: i64,
    pub program_id: i64,
    pub priority: i32,
}
