use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::Database;
use crate::error::{Result, StorageError};
use crate::models::{Application, Candidate, Preference, Program};
use crate::repository::{
    application::ApplicationRepository, candidate::CandidateRepository,
    preference::PreferenceRepository, program::ProgramRepository,
};

/// Read-only access to the records an allocation run is computed from.
#[async_trait]
pub trait AdmissionSource: Send + Sync {
    /// Validated applications that have a final grade
    async fn load_eligible_applications(&self) -> Result<Vec<Application>>;

    /// Preferences grouped by application id, priority ascending within a group
    async fn load_preferences(&self, application_ids: &[i64]) -> Result<Vec<Preference>>;

    async fn load_programs_with_capacity(&self) -> Result<Vec<Program>>;

    async fn load_candidates(&self, candidate_ids: &[i64]) -> Result<HashMap<i64, Candidate>>;
}

#[async_trait]
impl AdmissionSource for Database {
    async fn load_eligible_applications(&self) -> Result<Vec<Application>> {
        ApplicationRepository::new(self.pool()).list_eligible().await
    }

    async fn load_preferences(&self, application_ids: &[i64]) -> Result<Vec<Preference>> {
        PreferenceRepository::new(self.pool())
            .list_for_applications(application_ids)
            .await
    }

    async fn load_programs_with_capacity(&self) -> Result<Vec<Program>> {
        ProgramRepository::new(self.pool()).list_with_faculty().await
    }

    async fn load_candidates(&self, candidate_ids: &[i64]) -> Result<HashMap<i64, Candidate>> {
        CandidateRepository::new(self.pool())
            .find_by_ids(candidate_ids)
            .await
    }
}

/// Full set of source records held by [`InMemorySource`]
#[derive(Debug, Clone, Default)]
pub struct SourceRecords {
    pub applications: Vec<Application>,
    pub preferences: Vec<Preference>,
    pub programs: Vec<Program>,
    pub candidates: Vec<Candidate>,
}

/// Source backed by plain vectors, answering the same queries the database does.
///
/// Can be switched into an unavailable mode where every load fails.
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: RwLock<SourceRecords>,
    unavailable: AtomicBool,
}

impl InMemorySource {
    pub fn new(records: SourceRecords) -> Self {
        Self {
            records: RwLock::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn replace(&self, records: SourceRecords) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Result<SourceRecords> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory source switched off".to_string(),
            ));
        }

        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[async_trait]
impl AdmissionSource for InMemorySource {
    async fn load_eligible_applications(&self) -> Result<Vec<Application>> {
        let mut applications: Vec<Application> = self
            .snapshot()?
            .applications
            .into_iter()
            .filter(Application::is_eligible)
            .collect();
        applications.sort_by_key(|application| application.application_id);
        Ok(applications)
    }

    async fn load_preferences(&self, application_ids: &[i64]) -> Result<Vec<Preference>> {
        let wanted: HashSet<i64> = application_ids.iter().copied().collect();
        let mut preferences: Vec<Preference> = self
            .snapshot()?
            .preferences
            .into_iter()
            .filter(|preference| wanted.contains(&preference.application_id))
            .collect();
        preferences.sort_by_key(|preference| (preference.application_id, preference.priority));
        Ok(preferences)
    }

    async fn load_programs_with_capacity(&self) -> Result<Vec<Program>> {
        let mut programs = self.snapshot()?.programs;
        programs.sort_by_key(|program| program.program_id);
        Ok(programs)
    }

    async fn load_candidates(&self, candidate_ids: &[i64]) -> Result<HashMap<i64, Candidate>> {
        let wanted: HashSet<i64> = candidate_ids.iter().copied().collect();
        Ok(self
            .snapshot()?
            .candidates
            .into_iter()
            .filter(|candidate| wanted.contains(&candidate.candidate_id))
            .map(|candidate| (candidate.candidate_id, candidate))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn preference(
        preference_id: i64,
        application_id: i64,
        program_id: i64,
        priority: i32,
    ) -> Preference {
        Preference {
            preference_id,
            application_id,
            program_id,
            priority,
        }
    }

    fn records() -> SourceRecords {
        let submitted_at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        SourceRecords {
            applications: vec![
                Application {
                    application_id: 2,
                    candidate_id: 20,
                    status: "VALIDATED".to_string(),
                    grade: Some(Decimal::new(900, 2)),
                    submitted_at,
                },
                Application {
                    application_id: 1,
                    candidate_id: 10,
                    status: "VALIDATED".to_string(),
                    grade: None,
                    submitted_at,
                },
                Application {
                    application_id: 3,
                    candidate_id: 30,
                    status: "REJECTED_DOCS".to_string(),
                    grade: Some(Decimal::new(700, 2)),
                    submitted_at,
                },
            ],
            preferences: vec![
                preference(1, 2, 7, 2),
                preference(2, 2, 8, 1),
                preference(3, 3, 7, 1),
            ],
            programs: Vec::new(),
            candidates: vec![Candidate {
                candidate_id: 20,
                first_name: "Ana".to_string(),
                last_name: "Pop".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_only_eligible_applications_are_loaded() {
        let source = InMemorySource::new(records());
        let applications = source.load_eligible_applications().await.unwrap();

        let ids: Vec<i64> = applications.iter().map(|a| a.application_id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_preferences_are_filtered_and_ordered_by_priority() {
        let source = InMemorySource::new(records());
        let preferences = source.load_preferences(&[2]).await.unwrap();

        let programs: Vec<i64> = preferences.iter().map(|p| p.program_id).collect();
        assert_eq!(programs, vec![8, 7]);
    }

    #[tokio::test]
    async fn test_unknown_candidates_are_absent() {
        let source = InMemorySource::new(records());
        let candidates = source.load_candidates(&[20, 99]).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[&20].last_name, "Pop");
    }

    #[tokio::test]
    async fn test_unavailable_source_fails_every_load() {
        let source = InMemorySource::new(records());
        source.set_unavailable(true);

        assert!(matches!(
            source.load_eligible_applications().await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(source.load_programs_with_capacity().await.is_err());

        source.set_unavailable(false);
        assert!(source.load_programs_with_capacity().await.is_ok());
    }
}
