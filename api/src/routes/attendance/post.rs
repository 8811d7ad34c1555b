use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Local;
use db::models::{
    attendance::{Model as AttendanceModel, Registration},
    user::Model as UserModel,
};
use serde::Deserialize;
use util::{config, state::AppState};

use super::common::{AttendanceResponse, QrResponse, registration_error_status};
use crate::auth::{AuthUser, guards::ensure_course_staff, qr::verify_qr_token};
use crate::response::ApiResponse;
use crate::routes::common::{bad_request, forward_guard};
use crate::services::qr;
use crate::ws::attendance::{emit, payload};

#[derive(Debug, Deserialize)]
pub struct StartQrRequest {
    pub course_id: Option<i64>,
}

/// POST /api/attendance/qr
///
/// Starts the rotating QR of a course, or reissues the token if it is
/// already running. The class start used for lateness is kept.
///
/// - `200 OK` `{ course_id, token, expires_at, started_at, rotation_seconds }`
/// - `403 Forbidden` teacher does not own the course
/// - `404 Not Found` unknown course
pub async fn start_qr(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<StartQrRequest>,
) -> impl IntoResponse {
    let Some(course_id) = req.course_id else {
        return bad_request::<QrResponse>("course_id is required");
    };

    if let Err(e) = ensure_course_staff(app_state.db(), &user, course_id).await {
        return forward_guard(e);
    }

    match qr::start_or_refresh(app_state.qr(), app_state.ws(), course_id, user.id()).await {
        Ok(entry) => {
            tracing::info!(course_id, user = user.id(), "QR started");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    QrResponse::from(&entry),
                    "QR started successfully",
                )),
            )
        }
        Err(e) => {
            tracing::error!(course_id, error = %e, "failed to sign QR token");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to issue QR token")),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub qr_token: String,
}

/// POST /api/attendance/register
///
/// A student scans the course QR. The record is `late` when more than
/// `LATE_AFTER_MINUTES` passed since the QR was first started, otherwise
/// `present`. Broadcasts `attendance.registered` on the course room.
///
/// - `201 Created` the new record
/// - `400 Bad Request` missing, forged or expired token
/// - `403 Forbidden` not enrolled
/// - `404 Not Found` course no longer exists
/// - `409 Conflict` already registered today
pub async fn register_attendance(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let token = req.qr_token.trim();
    if token.is_empty() {
        return bad_request::<AttendanceResponse>("QR token is required");
    }

    let claims = match verify_qr_token(token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(user = user.id(), reason = ?e, "QR token rejected");
            return bad_request("QR code is invalid or has expired");
        }
    };

    let registration = Registration {
        student_id: user.id(),
        course_id: claims.course_id,
        started_at: claims.started_at(),
        now: Local::now(),
        late_after_minutes: config::late_after_minutes(),
    };

    let record = match AttendanceModel::register(db, registration).await {
        Ok(r) => r,
        Err(e) => {
            let status = registration_error_status(&e);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %e, "attendance registration failed");
            }
            return (status, Json(ApiResponse::error(e.to_string())));
        }
    };

    let student_name = UserModel::find_by_id(db, user.id())
        .await
        .ok()
        .flatten()
        .map(|u| u.name)
        .unwrap_or_default();

    emit::attendance_registered(
        app_state.ws(),
        payload::AttendanceRegistered {
            id: record.id,
            course_id: record.course_id,
            student_id: record.student_id,
            student_name,
            date: record.date,
            time: record.time,
            status: record.status,
        },
    )
    .await;

    tracing::info!(
        course_id = record.course_id,
        student_id = record.student_id,
        status = %record.status,
        "attendance registered"
    );

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            AttendanceResponse::from(record),
            "Attendance registered successfully",
        )),
    )
}
