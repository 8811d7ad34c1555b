//! `/students` routes: the student roster as seen by staff.
//!
//! - `GET /students` → `list_students` (admin, teacher)
//! - `PUT /students/{student_id}` → `update_student` (admin, teacher)
//! - `DELETE /students/{student_id}` → `delete_student` (admin)

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_staff};

pub mod delete;
pub mod get;
pub mod put;

pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_students).route_layer(from_fn(allow_staff)))
        .route(
            "/{student_id}",
            put(put::update_student).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{student_id}",
            delete(delete::delete_student).route_layer(from_fn(allow_admin)),
        )
}
