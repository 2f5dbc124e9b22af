use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    Admitted,
    Rejected,
}

/// One row of an allocation result set.
///
/// A rejected application still carries the program and priority of its first
/// preference, when it had one, so listings can show what was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AllocationOutcome {
    pub application_id: i64,
    pub candidate_id: i64,
    pub candidate_first_name: String,
    pub candidate_last_name: String,
    pub grade: Decimal,
    pub submitted_at: DateTime<Utc>,
    pub priority: Option<i32>,
    pub status: AllocationStatus,
    pub program_id: Option<i64>,
    pub program_name: Option<String>,
    pub faculty_name: Option<String>,
}

impl AllocationOutcome {
    pub fn is_admitted(&self) -> bool {
        self.status == AllocationStatus::Admitted
    }
}

/// Counters returned to whoever triggered an allocation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AllocationSummary {
    pub processed: u32,
    pub admitted: u32,
    pub unallocated: u32,
}
