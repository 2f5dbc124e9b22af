use storage::{
    dto::report::{DateRange, FacultyResultRow, ProgramEnrollmentRow},
    error::Result,
    services::{AdmissionSource, ResultSnapshot, reports},
};

/// Admitted count per program for applications submitted inside `range`
pub async fn program_enrollment(
    source: &dyn AdmissionSource,
    snapshot: &ResultSnapshot,
    range: &DateRange,
) -> Result<Vec<ProgramEnrollmentRow>> {
    let outcomes = reports::filter_by_submission(snapshot.outcomes(), range);
    let programs = source.load_programs_with_capacity().await?;

    Ok(reports::program_enrollment(&outcomes, &programs))
}

/// Admitted and rejected counts per faculty for applications submitted inside `range`
pub async fn faculty_results(
    source: &dyn AdmissionSource,
    snapshot: &ResultSnapshot,
    range: &DateRange,
) -> Result<Vec<FacultyResultRow>> {
    let outcomes = reports::filter_by_submission(snapshot.outcomes(), range);
    if outcomes.is_empty() {
        return Ok(Vec::new());
    }

    let programs = source.load_programs_with_capacity().await?;
    let preferences = source
        .load_preferences(&reports::rejected_application_ids(&outcomes))
        .await?;

    Ok(reports::faculty_results(&outcomes, &programs, &preferences))
}
