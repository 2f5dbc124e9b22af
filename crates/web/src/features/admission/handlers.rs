use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::allocation::{AllocationOutcome, AllocationSummary};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/allocation",
    responses(
        (status = 200, description = "Allocation run completed and published", body = AllocationSummary),
        (status = 503, description = "Admission data unavailable, previous results kept")
    ),
    tag = "allocation"
)]
pub async fn trigger_allocation(State(state): State<AppState>) -> Result<Response, WebError> {
    let (summary, _snapshot) = services::trigger_allocation(&state.engine).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/results",
    responses(
        (status = 200, description = "Outcomes of the latest allocation run, in rank order", body = Vec<AllocationOutcome>)
    ),
    tag = "allocation"
)]
pub async fn list_latest_results(State(state): State<AppState>) -> Result<Response, WebError> {
    let snapshot = services::latest_results(&state.engine);

    Ok(Json(snapshot.outcomes()).into_response())
}
