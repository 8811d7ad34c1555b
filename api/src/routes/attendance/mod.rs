//! `/attendance` routes: QR control, student registration and reports.
//!
//! QR control
//! - `POST /attendance/qr` → `start_qr` (admin, owning teacher)
//! - `GET /attendance/qr/{course_id}` → `get_qr` (admin, owning teacher)
//! - `DELETE /attendance/qr/{course_id}` → `stop_qr` (admin, owning teacher)
//!
//! Students
//! - `POST /attendance/register` → `register_attendance`
//! - `GET /attendance/me` → `my_attendance`
//!
//! Reports (admin, owning teacher; `course_id` query parameter)
//! - `GET /attendance/today`, `/daily`, `/history`, `/history/export`
//!
//! Corrections (admin, owning teacher of the record's course)
//! - `PUT /attendance/{attendance_id}`, `DELETE /attendance/{attendance_id}`

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_course_staff, allow_staff, allow_student};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/qr", post(post::start_qr).route_layer(from_fn(allow_staff)))
        .route(
            "/qr/{course_id}",
            get(get::get_qr).route_layer(from_fn_with_state(app_state.clone(), allow_course_staff)),
        )
        .route(
            "/qr/{course_id}",
            delete(delete::stop_qr)
                .route_layer(from_fn_with_state(app_state.clone(), allow_course_staff)),
        )
        .route(
            "/register",
            post(post::register_attendance).route_layer(from_fn(allow_student)),
        )
        .route("/me", get(get::my_attendance).route_layer(from_fn(allow_student)))
        .route("/today", get(get::today).route_layer(from_fn(allow_staff)))
        .route("/daily", get(get::daily).route_layer(from_fn(allow_staff)))
        .route("/history", get(get::history).route_layer(from_fn(allow_staff)))
        .route(
            "/history/export",
            get(get::export_history).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{attendance_id}",
            put(put::update_status).route_layer(from_fn(allow_staff)),
        )
        .route(
            "/{attendance_id}",
            delete(delete::delete_attendance).route_layer(from_fn(allow_staff)),
        )
}
