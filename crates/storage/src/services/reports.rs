use std::collections::{BTreeMap, HashMap};

use crate::dto::allocation::{AllocationOutcome, AllocationStatus};
use crate::dto::report::{DateRange, FacultyResultRow, ProgramEnrollmentRow};
use crate::models::{Preference, Program};

/// Outcomes whose submission date falls inside `range`, in their original order
pub fn filter_by_submission(
    outcomes: &[AllocationOutcome],
    range: &DateRange,
) -> Vec<AllocationOutcome> {
    if range.is_unbounded() {
        return outcomes.to_vec();
    }

    outcomes
        .iter()
        .filter(|outcome| range.contains(&outcome.submitted_at))
        .cloned()
        .collect()
}

/// Admitted count for every program, including programs nobody was admitted to.
///
/// Sorted by faculty name then program name, ignoring case.
pub fn program_enrollment(
    outcomes: &[AllocationOutcome],
    programs: &[Program],
) -> Vec<ProgramEnrollmentRow> {
    let mut enrolled: HashMap<i64, u32> = HashMap::new();
    for outcome in outcomes.iter().filter(|outcome| outcome.is_admitted()) {
        if let Some(program_id) = outcome.program_id {
            *enrolled.entry(program_id).or_default() += 1;
        }
    }

    let mut rows: Vec<ProgramEnrollmentRow> = programs
        .iter()
        .map(|program| ProgramEnrollmentRow {
            program_id: program.program_id,
            program_name: program.name.clone(),
            faculty_name: program.faculty_name.clone(),
            enrolled: enrolled.get(&program.program_id).copied().unwrap_or(0),
        })
        .collect();

    rows.sort_by(|left, right| {
        left.faculty_name
            .to_lowercase()
            .cmp(&right.faculty_name.to_lowercase())
            .then_with(|| left.program_name.to_lowercase().cmp(&right.program_name.to_lowercase()))
    });

    rows
}

/// Admitted and rejected counts per faculty, sorted by faculty name.
///
/// Admitted outcomes count towards the faculty they were admitted to. Rejected
/// ones count towards the faculty of their first preference that still points
/// at a known program; with no such preference they are left out.
/// `preferences` must be ordered by priority within each application.
pub fn faculty_results(
    outcomes: &[AllocationOutcome],
    programs: &[Program],
    preferences: &[Preference],
) -> Vec<FacultyResultRow> {
    if outcomes.is_empty() {
        return Vec::new();
    }

    let faculty_by_program: HashMap<i64, &str> = programs
        .iter()
        .map(|program| (program.program_id, program.faculty_name.as_str()))
        .collect();

    let mut by_faculty: BTreeMap<String, FacultyResultRow> = programs
        .iter()
        .map(|program| {
            (
                program.faculty_name.clone(),
                FacultyResultRow {
                    faculty_name: program.faculty_name.clone(),
                    admitted: 0,
                    rejected: 0,
                },
            )
        })
        .collect();

    let mut rejected_faculty: HashMap<i64, &str> = HashMap::new();
    for preference in preferences {
        if rejected_faculty.contains_key(&preference.application_id) {
            continue;
        }
        if let Some(faculty) = faculty_by_program.get(&preference.program_id).copied() {
            rejected_faculty.insert(preference.application_id, faculty);
        }
    }

    for outcome in outcomes {
        let faculty = match outcome.status {
            AllocationStatus::Admitted => outcome.faculty_name.as_deref(),
            AllocationStatus::Rejected => rejected_faculty.get(&outcome.application_id).copied(),
        };
        let Some(faculty) = faculty else {
            continue;
        };

        let row = by_faculty
            .entry(faculty.to_string())
            .or_insert_with(|| FacultyResultRow {
                faculty_name: faculty.to_string(),
                admitted: 0,
                rejected: 0,
            });
        match outcome.status {
            AllocationStatus::Admitted => row.admitted += 1,
            AllocationStatus::Rejected => row.rejected += 1,
        }
    }

    by_faculty.into_values().collect()
}

/// Ids of rejected outcomes, the applications whose preferences [`faculty_results`] needs
pub fn rejected_application_ids(outcomes: &[AllocationOutcome]) -> Vec<i64> {
    outcomes
        .iter()
        .filter(|outcome| !outcome.is_admitted())
        .map(|outcome| outcome.application_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn program(program_id: i64, faculty_name: &str, name: &str) -> Program {
        Program {
            program_id,
            faculty_id: program_id,
            faculty_name: faculty_name.to_string(),
            name: name.to_string(),
            budget_seats: 1,
            fee_seats: 1,
        }
    }

    fn outcome(
        application_id: i64,
        day: u32,
        status: AllocationStatus,
        program: Option<&Program>,
    ) -> AllocationOutcome {
        AllocationOutcome {
            application_id,
            candidate_id: application_id,
            candidate_first_name: "Ion".to_string(),
            candidate_last_name: "Ionescu".to_string(),
            grade: Decimal::new(900, 2),
            submitted_at: Utc.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap(),
            priority: program.map(|_| 1),
            status,
            program_id: program.map(|p| p.program_id),
            program_name: program.map(|p| p.name.clone()),
            faculty_name: program.map(|p| p.faculty_name.clone()),
        }
    }

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

    fn row(faculty_name: &str, admitted: u32, rejected: u32) -> FacultyResultRow {
        FacultyResultRow {
            faculty_name: faculty_name.to_string(),
            admitted,
            rejected,
        }
    }

    fn programs() -> Vec<Program> {
        vec![
            program(1, "sciences", "Physics"),
            program(2, "Letters", "History"),
            program(3, "Sciences", "computer science"),
            program(4, "Law", "Law"),
        ]
    }

    #[test]
    fn test_filter_by_submission_respects_bounds() {
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Rejected, None),
            outcome(2, 5, AllocationStatus::Rejected, None),
            outcome(3, 9, AllocationStatus::Rejected, None),
        ];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 7, 2),
            NaiveDate::from_ymd_opt(2024, 7, 9),
        );

        let filtered = filter_by_submission(&outcomes, &range);
        let ids: Vec<i64> = filtered.iter().map(|o| o.application_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_program_enrollment_lists_every_program_sorted() {
        let programs = programs();
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Admitted, Some(&programs[0])),
            outcome(2, 1, AllocationStatus::Admitted, Some(&programs[0])),
            outcome(3, 1, AllocationStatus::Rejected, Some(&programs[1])),
            outcome(4, 1, AllocationStatus::Admitted, Some(&programs[2])),
        ];

        let rows = program_enrollment(&outcomes, &programs);

        let summary: Vec<(&str, u32)> = rows
            .iter()
            .map(|row| (row.program_name.as_str(), row.enrolled))
            .collect();
        assert_eq!(
            summary,
            vec![("Law", 0), ("History", 0), ("computer science", 1), ("Physics", 2)]
        );
    }

    #[test]
    fn test_faculty_results_counts_admitted_and_rejected() {
        let programs = vec![program(1, "Sciences", "Physics"), program(2, "Letters", "History")];
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Admitted, Some(&programs[0])),
            outcome(2, 1, AllocationStatus::Rejected, Some(&programs[0])),
            outcome(3, 1, AllocationStatus::Rejected, None),
        ];
        let preferences = vec![
            preference(1, 2, 99, 1),
            preference(2, 2, 2, 2),
            preference(3, 2, 1, 3),
        ];

        let rows = faculty_results(&outcomes, &programs, &preferences);

        assert_eq!(rows, vec![row("Letters", 0, 1), row("Sciences", 1, 0)]);
    }

    #[test]
    fn test_faculty_results_keeps_faculties_with_no_outcomes() {
        let programs = vec![
            program(1, "Sciences", "Physics"),
            program(2, "Letters", "History"),
            program(4, "Law", "Law"),
        ];
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Admitted, Some(&programs[0])),
            outcome(2, 1, AllocationStatus::Rejected, Some(&programs[1])),
        ];
        let preferences = vec![preference(1, 2, 2, 1)];

        let rows = faculty_results(&outcomes, &programs, &preferences);

        assert_eq!(
            rows,
            vec![
                row("Law", 0, 0),
                row("Letters", 0, 1),
                row("Sciences", 1, 0),
            ]
        );
    }

    #[test]
    fn test_filter_by_submission_unbounded_keeps_everything() {
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Rejected, None),
            outcome(2, 30, AllocationStatus::Rejected, None),
        ];

        let filtered = filter_by_submission(&outcomes, &DateRange::default());
        assert_eq!(filtered, outcomes);
    }

    #[test]
    fn test_faculty_results_empty_when_no_outcomes() {
        assert!(faculty_results(&[], &programs(), &[]).is_empty());
    }

    #[test]
    fn test_rejected_application_ids() {
        let programs = programs();
        let outcomes = vec![
            outcome(1, 1, AllocationStatus::Admitted, Some(&programs[0])),
            outcome(2, 1, AllocationStatus::Rejected, None),
        ];
        assert_eq!(rejected_application_ids(&outcomes), vec![2]);
    }
}
