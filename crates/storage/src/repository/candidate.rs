use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::Result;
use crate::models::Candidate;

pub struct CandidateRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CandidateRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up candidates by id. Ids with no matching row are left out of the map.
    pub async fn find_by_ids(&self, candidate_ids: &[i64]) -> Result<HashMap<i64, Candidate>> {
        if candidate_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT candidate_id, first_name, last_name
            FROM candidates
            WHERE candidate_id = ANY($1)
            "#,
        )
        .bind(candidate_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(candidates
            .into_iter()
            .map(|candidate| (candidate.candidate_id, candidate))
            .collect())
    }
}
