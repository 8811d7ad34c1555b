//! `/enrollments` routes.
//!
//! - `POST /enrollments` → `enroll_student` (admin, owning teacher)
//! - `POST /enrollments/import` → `import_roster` (admin, multipart CSV)
//! - `DELETE /enrollments/{course_id}/{student_id}` → `unenroll_student` (admin, owning teacher)

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_course_staff, allow_staff};

pub mod common;
pub mod delete;
pub mod post;

pub fn enrollments_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(post::enroll_student).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/import",
            post(post::import_roster).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/{student_id}",
            delete(delete::unenroll_student)
                .route_layer(from_fn_with_state(app_state, allow_course_staff)),
        )
}
