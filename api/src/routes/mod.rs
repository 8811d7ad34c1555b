//! HTTP routes under `/api`.
//!
//! - `/health` public liveness probe
//! - `/auth` login and current user
//! - `/users` user management (admin)
//! - `/students` student roster management (admin, teacher)
//! - `/courses` courses and their rosters
//! - `/enrollments` linking students to courses, CSV import
//! - `/attendance` QR control, registration, reports

use crate::auth::guards::allow_admin;
use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, courses::courses_routes,
    enrollments::enrollments_routes, health::health_routes, students::students_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod students;
pub mod users;

/// Builds the `/api` router.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest("/students", students_routes())
        .nest("/courses", courses_routes(app_state.clone()))
        .nest("/enrollments", enrollments_routes(app_state.clone()))
        .nest("/attendance", attendance_routes(app_state.clone()))
        .with_state(app_state)
}
