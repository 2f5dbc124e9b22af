use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::report::{DateRange, FacultyResultRow, ProgramEnrollmentRow};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/admin/reports/program-enrollment",
    params(DateRange),
    responses(
        (status = 200, description = "Admitted count per study program", body = Vec<ProgramEnrollmentRow>),
        (status = 400, description = "Invalid date range")
    ),
    tag = "reports"
)]
pub async fn get_program_enrollment(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    range.validate()?;

    let snapshot = state.engine.latest();
    let rows = services::program_enrollment(state.source.as_ref(), &snapshot, &range).await?;

    Ok(Json(rows).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/reports/faculty-results",
    params(DateRange),
    responses(
        (status = 200, description = "Admitted and rejected counts per faculty", body = Vec<FacultyResultRow>),
        (status = 400, description = "Invalid date range")
    ),
    tag = "reports"
)]
pub async fn get_faculty_results(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    range.validate()?;

    let snapshot = state.engine.latest();
    let rows = services::faculty_results(state.source.as_ref(), &snapshot, &range).await?;

    Ok(Json(rows).into_response())
}
