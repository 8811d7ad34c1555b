use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use db::models::attendance::{DailyEntry, DaySummary, Model as AttendanceModel};
use util::state::AppState;

use super::common::{
    CourseQuery, CourseRecordResponse, DailyQuery, HistoryQuery, MyAttendanceResponse,
    QrResponse, csv_escape, export_filename, resolve_range,
};
use crate::auth::{AuthUser, guards::ensure_course_staff};
use crate::response::ApiResponse;
use crate::routes::common::{bad_request, db_error, forward_guard};

/// GET /api/attendance/qr/{course_id}
///
/// The token currently shown for the course.
pub async fn get_qr(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    match app_state.qr().get(course_id).await {
        Some(entry) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QrResponse::from(&entry),
                "QR retrieved successfully",
            )),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("QR is not running for this course")),
        ),
    }
}

/// GET /api/attendance/me
///
/// The caller's records, newest first, optionally for one `course_id`.
pub async fn my_attendance(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CourseQuery>,
) -> impl IntoResponse {
    match AttendanceModel::for_student(app_state.db(), user.id(), query.course_id).await {
        Ok(rows) => {
            let records: Vec<MyAttendanceResponse> = rows
                .into_iter()
                .map(|(a, c)| MyAttendanceResponse::new(a, c))
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(records, "Attendance retrieved successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}

/// GET /api/attendance/today?course_id=
///
/// Today's records of the course in scan order.
pub async fn today(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CourseQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let Some(course_id) = query.course_id else {
        return bad_request::<Vec<CourseRecordResponse>>("course_id is required");
    };
    if let Err(e) = ensure_course_staff(db, &user, course_id).await {
        return forward_guard(e);
    }

    match AttendanceModel::for_course_on(db, course_id, Local::now().date_naive()).await {
        Ok(rows) => {
            let records: Vec<CourseRecordResponse> = rows
                .into_iter()
                .map(|(a, s)| CourseRecordResponse::new(a, s))
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(records, "Attendance retrieved successfully")),
            )
        }
        Err(e) => db_error(e),
    }
}

/// GET /api/attendance/daily?course_id=&date=
///
/// Every enrolled student with their status on `date` (default today).
/// Students without a record are reported `absent`.
pub async fn daily(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DailyQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let Some(course_id) = query.course_id else {
        return bad_request::<Vec<DailyEntry>>("course_id is required");
    };
    if let Err(e) = ensure_course_staff(db, &user, course_id).await {
        return forward_guard(e);
    }

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    match AttendanceModel::daily_report(db, course_id, date).await {
        Ok(entries) => (
            StatusCode::OK,
            Json(ApiResponse::success(entries, "Daily report retrieved successfully")),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/attendance/history?course_id=&from=&to=
///
/// Per-day counts, newest first. Only days with at least one record appear.
pub async fn history(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let Some(course_id) = query.course_id else {
        return bad_request::<Vec<DaySummary>>("course_id is required");
    };
    if let Err(e) = ensure_course_staff(db, &user, course_id).await {
        return forward_guard(e);
    }

    let (from, to) = match resolve_range(query.from, query.to, Local::now().date_naive()) {
        Ok(range) => range,
        Err(msg) => return bad_request(msg),
    };

    match AttendanceModel::history(db, course_id, from, to).await {
        Ok(days) => (
            StatusCode::OK,
            Json(ApiResponse::success(days, "History retrieved successfully")),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/attendance/history/export?course_id=&from=&to=
///
/// Individual records of the range as a CSV attachment with columns
/// `date,time,student_id,student_name,national_id,status`.
pub async fn export_history(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let db = app_state.db();
    let Some(course_id) = query.course_id else {
        return bad_request::<()>("course_id is required").into_response();
    };
    let course = match ensure_course_staff(db, &user, course_id).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    let (from, to) = match resolve_range(query.from, query.to, Local::now().date_naive()) {
        Ok(range) => range,
        Err(msg) => return bad_request::<()>(msg).into_response(),
    };

    let rows = match AttendanceModel::for_course_between(db, course_id, from, to).await {
        Ok(rows) => rows,
        Err(e) => return db_error::<()>(e).into_response(),
    };

    let mut csv = String::from("date,time,student_id,student_name,national_id,status\n");
    for (record, student) in rows {
        let (name, national_id) = student
            .map(|s| (s.name, s.national_id.unwrap_or_default()))
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            record.date,
            record.time.format("%H:%M:%S"),
            record.student_id,
            csv_escape(&name),
            csv_escape(&national_id),
            record.status,
        ));
    }

    let filename = export_filename(&course.code, from, to);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, headers, csv).into_response()
}
