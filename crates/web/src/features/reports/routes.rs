use axum::{Router, routing::get};

use super::handlers::{get_faculty_results, get_program_enrollment};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/program-enrollment", get(get_program_enrollment))
        .route("/faculty-results", get(get_faculty_results))
}
