use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{list_latest_results, trigger_allocation};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/allocation", post(trigger_allocation))
        .route("/results", get(list_latest_results))
}
