use axum::Router;

use crate::features::{admission, reports};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(admission::routes::routes())
        .nest("/reports", reports::routes::routes());

    Router::new().nest("/api/admin", admin).with_state(state)
}
