use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Application, STATUS_VALIDATED};

pub struct ApplicationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Applications that take part in allocation: validated and graded
    pub async fn list_eligible(&self) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT application_id, candidate_id, status, grade, submitted_at
            FROM applications
            WHERE status = $1
              AND grade IS NOT NULL
            ORDER BY application_id
            "#,
        )
        .bind(STATUS_VALIDATED)
        .fetch_all(self.pool)
        .await?;

        Ok(applications)
    }
}
