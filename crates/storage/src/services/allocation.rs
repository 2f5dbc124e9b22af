use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::dto::allocation::{AllocationOutcome, AllocationStatus, AllocationSummary};
use crate::error::StorageError;
use crate::models::{Application, Candidate, Preference, Program};

use super::capacity::CapacityLedger;
use super::ranking::rank;
use super::results::{ResultCache, ResultSnapshot};
use super::source::AdmissionSource;

#[derive(Debug, Error)]
pub enum AllocationError {
    /// A seat was consumed on a program with none left. Capacity is checked
    /// before every consumption, so this indicates a bug in the engine.
    #[error("No seat left on program {program_id}")]
    InsufficientCapacity { program_id: i64 },

    #[error("Admission source unavailable: {0}")]
    SourceUnavailable(#[from] StorageError),
}

/// Everything one allocation run reads.
#[derive(Debug, Clone, Default)]
pub struct AllocationInput {
    pub applications: Vec<Application>,
    pub preferences: Vec<Preference>,
    pub programs: Vec<Program>,
    pub candidates: HashMap<i64, Candidate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRun {
    pub summary: AllocationSummary,
    pub outcomes: Vec<AllocationOutcome>,
}

enum Decision<'a> {
    Admitted(&'a Preference),
    /// Carries the first preference, if any, for display
    Rejected(Option<&'a Preference>),
}

/// Rank the applications and hand out seats greedily.
///
/// Each application, in rank order, takes a seat on the first program in its
/// preference list that still has one. Applications are never revisited.
pub fn allocate(input: AllocationInput) -> Result<AllocationRun, AllocationError> {
    let AllocationInput {
        applications,
        preferences,
        programs,
        candidates,
    } = input;

    let programs_by_id: HashMap<i64, &Program> = programs
        .iter()
        .map(|program| (program.program_id, program))
        .collect();
    let mut ledger = CapacityLedger::from_programs(&programs);
    let preferences_by_application = group_preferences(preferences);

    let mut summary = AllocationSummary::default();
    let mut outcomes = Vec::with_capacity(applications.len());

    for application in rank(applications) {
        let grade = match application.grade {
            Some(grade) if application.is_eligible() => grade,
            _ => {
                tracing::warn!(
                    application_id = application.application_id,
                    status = %application.status,
                    "Skipping ineligible application"
                );
                continue;
            }
        };

        let choices = preferences_by_application
            .get(&application.application_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let (status, recorded) = match decide(choices, &mut ledger)? {
            Decision::Admitted(preference) => (AllocationStatus::Admitted, Some(preference)),
            Decision::Rejected(first) => (AllocationStatus::Rejected, first),
        };

        summary.processed += 1;
        match status {
            AllocationStatus::Admitted => summary.admitted += 1,
            AllocationStatus::Rejected => summary.unallocated += 1,
        }

        let program = recorded.and_then(|preference| {
            let program = programs_by_id.get(&preference.program_id).copied();
            if program.is_none() {
                tracing::warn!(
                    application_id = application.application_id,
                    program_id = preference.program_id,
                    "Preference references a missing program"
                );
            }
            program
        });

        let candidate = candidates.get(&application.candidate_id);
        if candidate.is_none() {
            tracing::warn!(
                application_id = application.application_id,
                candidate_id = application.candidate_id,
                "Application references a missing candidate"
            );
        }

        outcomes.push(AllocationOutcome {
            application_id: application.application_id,
            candidate_id: application.candidate_id,
            candidate_first_name: candidate.map(|c| c.first_name.clone()).unwrap_or_default(),
            candidate_last_name: candidate.map(|c| c.last_name.clone()).unwrap_or_default(),
            grade,
            submitted_at: application.submitted_at,
            priority: recorded.map(|preference| preference.priority),
            status,
            program_id: program.map(|p| p.program_id),
            program_name: program.map(|p| p.name.clone()),
            faculty_name: program.map(|p| p.faculty_name.clone()),
        });
    }

    Ok(AllocationRun { summary, outcomes })
}

fn decide<'a>(
    choices: &'a [Preference],
    ledger: &mut CapacityLedger,
) -> Result<Decision<'a>, AllocationError> {
    for preference in choices {
        if ledger.has_seat(preference.program_id) {
            ledger.consume_one(preference.program_id)?;
            return Ok(Decision::Admitted(preference));
        }
    }

    Ok(Decision::Rejected(choices.first()))
}

/// Group by application, priority ascending. Equal priorities keep their input order.
fn group_preferences(preferences: Vec<Preference>) -> HashMap<i64, Vec<Preference>> {
    let mut grouped: HashMap<i64, Vec<Preference>> = HashMap::new();
    for preference in preferences {
        grouped
            .entry(preference.application_id)
            .or_default()
            .push(preference);
    }

    for group in grouped.values_mut() {
        group.sort_by_key(|preference| preference.priority);
    }

    grouped
}

/// Runs allocations against a source and publishes the results.
///
/// Runs are not serialized: two concurrent runs compute independently and
/// whichever finishes last determines the published snapshot.
pub struct AllocationEngine {
    source: Arc<dyn AdmissionSource>,
    results: ResultCache,
}

impl AllocationEngine {
    pub fn new(source: Arc<dyn AdmissionSource>) -> Self {
        Self {
            source,
            results: ResultCache::new(),
        }
    }

    /// Recompute the allocation from current source data and publish it.
    ///
    /// Returns the snapshot this run published, which may already have been
    /// superseded by a concurrent run. On failure nothing is published and the
    /// previous snapshot stays in place.
    pub async fn run(&self) -> Result<(AllocationSummary, Arc<ResultSnapshot>), AllocationError> {
        let started = Instant::now();
        tracing::info!("Starting allocation run");

        let run = match self.load_input().await.and_then(allocate) {
            Ok(run) => run,
            Err(e) => {
                tracing::error!("Allocation run aborted, previous results kept: {}", e);
                return Err(e);
            }
        };

        let summary = run.summary;
        let snapshot = self.results.publish(ResultSnapshot::new(run.outcomes));

        tracing::info!(
            run_id = ?snapshot.run_id,
            processed = summary.processed,
            admitted = summary.admitted,
            unallocated = summary.unallocated,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Allocation run published"
        );

        Ok((summary, snapshot))
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> Arc<ResultSnapshot> {
        self.results.read()
    }

    async fn load_input(&self) -> Result<AllocationInput, AllocationError> {
        let applications = self.source.load_eligible_applications().await?;
        if applications.is_empty() {
            return Ok(AllocationInput::default());
        }

        let application_ids: Vec<i64> = applications
            .iter()
            .map(|application| application.application_id)
            .collect();
        let mut candidate_ids: Vec<i64> = applications
            .iter()
            .map(|application| application.candidate_id)
            .collect();
        candidate_ids.sort_unstable();
        candidate_ids.dedup();

        let preferences = self.source.load_preferences(&application_ids).await?;
        let programs = self.source.load_programs_with_capacity().await?;
        let candidates = self.source.load_candidates(&candidate_ids).await?;

        Ok(AllocationInput {
            applications,
            preferences,
            programs,
            candidates,
        })
    }
}
