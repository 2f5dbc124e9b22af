use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A study program joined with the name of its owning faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Program {
    pub program_id: i64,
    pub faculty_id: i64,
    pub faculty_name: String,
    pub name: String,
    pub budget_seats: i32,
    pub fee_seats: i32,
}

impl Program {
    /// Seats available to allocation. Budget and fee seats form a single pool;
    /// negative counts are treated as zero.
    pub fn total_capacity(&self) -> u32 {
        self.budget_seats.max(0) as u32 + self.fee_seats.max(0) as u32
    }
}
