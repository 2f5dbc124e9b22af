use sqlx::PgPool;

use crate::error::Result;
use crate::models::Program;

pub struct ProgramRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProgramRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All programs with their faculty name and seat counts
    pub async fn list_with_faculty(&self) -> Result<Vec<Program>> {
        let programs = sqlx::query_as::<_, Program>(
            r#"
            SELECT
                p.program_id,
                p.faculty_id,
                f.name as faculty_name,
                p.name,
                p.budget_seats,
                p.fee_seats
            FROM programs p
            INNER JOIN faculties f ON f.faculty_id = p.faculty_id
            ORDER BY p.program_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(programs)
    }
}
