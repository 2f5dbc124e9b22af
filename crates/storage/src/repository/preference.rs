use sqlx::PgPool;

use crate::error::Result;
use crate::models::Preference;

pub struct PreferenceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PreferenceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Preferences of the given applications, grouped by application and
    /// ordered by priority within each group
    pub async fn list_for_applications(&self, application_ids: &[i64]) -> Result<Vec<Preference>> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        let preferences = sqlx::query_as::<_, Preference>(
            r#"
            SELECT preference_id, application_id, program_id, priority
            FROM preferences
            WHERE application_id = ANY($1)
            ORDER BY application_id, priority, preference_id
            "#,
        )
        .bind(application_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(preferences)
    }
}
