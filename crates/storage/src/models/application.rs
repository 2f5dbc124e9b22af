use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Status value an application must carry to take part in allocation.
pub const STATUS_VALIDATED: &str = "VALIDATED";

/// A candidate's submitted admission case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Application {
    pub application_id: i64,
    pub candidate_id: i64,
    pub status: String,
    /// Final grade, two decimal places. `None` until the case has been graded.
    pub grade: Option<Decimal>,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    pub fn is_eligible(&self) -> bool {
        self.status == STATUS_VALIDATED && self.grade.is_some()
    }
}
