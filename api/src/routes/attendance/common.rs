use axum::http::StatusCode;
use chrono::{Duration, NaiveDate};
use db::models::{attendance, course, user};
use serde::{Deserialize, Serialize};
use util::config;
use util::qr::QrEntry;

use db::models::attendance::AttendanceError;

/// Default span of the history report when `from` is omitted.
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

#[derive(Debug, Serialize, Default)]
pub struct QrResponse {
    pub course_id: i64,
    pub token: String,
    pub expires_at: String,
    pub started_at: String,
    pub rotation_seconds: u64,
}

impl From<&QrEntry> for QrResponse {
    fn from(e: &QrEntry) -> Self {
        Self {
            course_id: e.course_id,
            token: e.token.clone(),
            expires_at: e.expires_at.to_rfc3339(),
            started_at: e.started_at.to_rfc3339(),
            rotation_seconds: config::qr_rotation_seconds(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct AttendanceResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub date: String,
    pub time: String,
    pub status: String,
    pub created_at: String,
}

impl From<attendance::Model> for AttendanceResponse {
    fn from(a: attendance::Model) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            course_id: a.course_id,
            date: a.date.to_string(),
            time: a.time.format("%H:%M:%S").to_string(),
            status: a.status.to_string(),
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

/// A record as seen by the student, with its course.
#[derive(Debug, Serialize, Default)]
pub struct MyAttendanceResponse {
    #[serde(flatten)]
    pub record: AttendanceResponse,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
}

impl MyAttendanceResponse {
    pub fn new(a: attendance::Model, c: Option<course::Model>) -> Self {
        Self {
            record: a.into(),
            course_name: c.as_ref().map(|c| c.name.clone()),
            course_code: c.map(|c| c.code),
        }
    }
}

/// A record of a course report, with its student.
#[derive(Debug, Serialize, Default)]
pub struct CourseRecordResponse {
    #[serde(flatten)]
    pub record: AttendanceResponse,
    pub student_name: String,
    pub national_id: Option<String>,
}

impl CourseRecordResponse {
    pub fn new(a: attendance::Model, s: Option<user::Model>) -> Self {
        let (student_name, national_id) = s
            .map(|s| (s.name, s.national_id))
            .unwrap_or_default();
        Self {
            record: a.into(),
            student_name,
            national_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CourseQuery {
    pub course_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    pub course_id: Option<i64>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub course_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Inclusive date range of the history report. `to` defaults to `today` and
/// `from` to `DEFAULT_HISTORY_DAYS` before `to`.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), &'static str> {
    let to = to.unwrap_or(today);
    let from = from.unwrap_or(to - Duration::days(DEFAULT_HISTORY_DAYS));
    if from > to {
        return Err("from must not be after to");
    }
    Ok((from, to))
}

pub fn registration_error_status(e: &AttendanceError) -> StatusCode {
    match e {
        AttendanceError::CourseNotFound => StatusCode::NOT_FOUND,
        AttendanceError::NotEnrolled => StatusCode::FORBIDDEN,
        AttendanceError::AlreadyRegistered => StatusCode::CONFLICT,
        AttendanceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Attachment name of a history export. Characters outside `[A-Za-z0-9._-]`
/// in the course code become `_` so the name is safe inside a quoted
/// `Content-Disposition` parameter.
pub fn export_filename(code: &str, from: NaiveDate, to: NaiveDate) -> String {
    let code: String = code
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("attendance_{code}_{from}_{to}.csv")
}
