use axum::{Router, middleware::from_fn_with_state, routing::get};
use util::state::AppState;

pub mod common;
pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use crate::auth::guards::allow_course_staff;
use handlers::course_room_ws_handler;

pub fn ws_course_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{course_id}", get(course_room_ws_handler))
        .route_layer(from_fn_with_state(app_state, allow_course_staff))
}
