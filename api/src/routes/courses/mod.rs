//! `/courses` routes.
//!
//! - `GET /courses` → `list_courses` (any signed-in user, scoped by role)
//! - `POST /courses` → `create_course` (admin)
//! - `GET /courses/{course_id}` → `get_course` (admin, owning teacher)
//! - `PUT /courses/{course_id}` → `update_course` (admin)
//! - `DELETE /courses/{course_id}` → `delete_course` (admin)
//! - `GET /courses/{course_id}/students` → `list_course_students` (admin, owning teacher)

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated, allow_course_staff};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn courses_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get::list_courses).route_layer(from_fn(allow_authenticated)),
        )
        .route("/", post(post::create_course).route_layer(from_fn(allow_admin)))
        .route(
            "/{course_id}",
            get(get::get_course)
                .route_layer(from_fn_with_state(app_state.clone(), allow_course_staff)),
        )
        .route(
            "/{course_id}",
            put(put::update_course).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}",
            delete(delete::delete_course).route_layer(from_fn(allow_admin)),
        )
        .route(
            "/{course_id}/students",
            get(get::list_course_students)
                .route_layer(from_fn_with_state(app_state.clone(), allow_course_staff)),
        )
}
