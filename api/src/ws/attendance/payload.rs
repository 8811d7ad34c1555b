use chrono::{NaiveDate, NaiveTime};
use db::models::attendance::Status;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRegistered {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceUpdated {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceDeleted {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct QrRotated {
    pub course_id: i64,
    pub token: String,
    pub expires_at: String, // RFC3339
    pub started_at: String, // RFC3339
    pub rotation_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QrStopped {
    pub course_id: i64,
}
