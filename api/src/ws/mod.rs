use axum::Router;
use util::state::AppState;

use crate::ws::attendance::ws_course_routes;

pub mod attendance;
pub mod core;

/// Builds the `/ws` router. Every room authenticates through its own guard.
pub fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/courses", ws_course_routes(app_state.clone()))
        .with_state(app_state)
}
