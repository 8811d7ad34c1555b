use axum::{
    Extension, Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::{
    course::Model as CourseModel,
    enrollment::{self, Model as EnrollmentModel},
    user::{Model as UserModel, Role},
};
use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use super::common::{ImportSummary, RosterRow, parse_roster};
use crate::auth::{AuthUser, guards::ensure_course_staff};
use crate::response::ApiResponse;
use crate::routes::common::{bad_request, conflict_or_db_error, db_error, forward_guard};

#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[validate(required(message = "course_id is required"))]
    pub course_id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "national_id is required"))]
    pub national_id: String,

    /// Defaults to the current half-year.
    #[validate(length(min = 1, max = 20, message = "period must be 1-20 characters"))]
    pub period: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub period: String,
    pub created_at: String,
}

/// POST /api/enrollments
///
/// Links the student with `national_id` to `course_id`.
///
/// - `201 Created`
/// - `403 Forbidden` teacher does not own the course
/// - `404 Not Found` unknown course or student
/// - `409 Conflict` already enrolled
pub async fn enroll_student(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<EnrollRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return bad_request::<EnrollmentResponse>(format_validation_errors(&e));
    }
    let Some(course_id) = req.course_id else {
        return bad_request("course_id is required");
    };

    if let Err(e) = ensure_course_staff(db, &user, course_id).await {
        return forward_guard(e);
    }

    let student = match UserModel::find_by_national_id(db, &req.national_id).await {
        Ok(Some(u)) if u.role == Role::Student => u,
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Student not found")),
            );
        }
        Err(e) => return db_error(e),
    };

    match EnrollmentModel::is_enrolled(db, student.id, course_id).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::error(
                    "Student is already enrolled in this course",
                )),
            );
        }
        Ok(false) => {}
        Err(e) => return db_error(e),
    }

    let period = req
        .period
        .map(|p| p.trim().to_owned())
        .unwrap_or_else(enrollment::current_period);

    match EnrollmentModel::create(db, student.id, course_id, &period).await {
        Ok(e) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                EnrollmentResponse {
                    id: e.id,
                    course_id: e.course_id,
                    student_id: e.student_id,
                    student_name: student.name,
                    period: e.period,
                    created_at: e.created_at.to_rfc3339(),
                },
                "Student enrolled successfully",
            )),
        ),
        Err(e) => conflict_or_db_error(e, "Student is already enrolled in this course"),
    }
}

/// POST /api/enrollments/import
///
/// Multipart form with a `course_id` text field and a `file` CSV roster
/// (`national_id,email,name[,last_name]`). Unknown students are created with
/// their national id as password, then everyone is enrolled in the course.
/// All writes happen in one transaction; rows that cannot be used are
/// reported in `errors` and do not abort the import.
///
/// - `200 OK` `{ created, enrolled, skipped, errors }`
/// - `400 Bad Request` missing field, unreadable or empty file
/// - `404 Not Found` unknown course
pub async fn import_roster(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut course_id: Option<i64> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request::<ImportSummary>(format!("Invalid multipart body: {e}")),
        };

        match field.name().unwrap_or("") {
            "course_id" => {
                let text = field.text().await.unwrap_or_default();
                course_id = text.trim().parse::<i64>().ok();
            }
            "file" => match field.bytes().await {
                Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                Err(e) => return bad_request(format!("Could not read file: {e}")),
            },
            _ => {}
        }
    }

    let Some(course_id) = course_id else {
        return bad_request("course_id is required");
    };
    let Some(file_bytes) = file_bytes else {
        return bad_request("file is required");
    };
    let Ok(content) = String::from_utf8(file_bytes) else {
        return bad_request("File must be UTF-8 encoded CSV");
    };

    match CourseModel::find_by_id(db, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Course not found")),
            );
        }
        Err(e) => return db_error(e),
    }

    let (rows, parse_errors) = parse_roster(&content);
    if rows.is_empty() && parse_errors.is_empty() {
        return bad_request("CSV file has no rows");
    }

    let txn = match db.begin().await {
        Ok(txn) => txn,
        Err(e) => return db_error(e),
    };

    let mut summary = ImportSummary {
        errors: parse_errors,
        ..Default::default()
    };
    let period = enrollment::current_period();

    for row in &rows {
        if let Err(e) = import_row(&txn, course_id, &period, row, &mut summary).await {
            tracing::error!(line = row.line, error = %e, "roster import failed; rolling back");
            return db_error(e);
        }
    }

    if let Err(e) = txn.commit().await {
        return db_error(e);
    }

    tracing::info!(
        course_id,
        created = summary.created,
        enrolled = summary.enrolled,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "roster imported"
    );

    (
        StatusCode::OK,
        Json(ApiResponse::success(summary, "Import finished")),
    )
}

async fn import_row(
    txn: &DatabaseTransaction,
    course_id: i64,
    period: &str,
    row: &RosterRow,
    summary: &mut ImportSummary,
) -> Result<(), DbErr> {
    let student = match UserModel::find_by_national_id(txn, &row.national_id).await? {
        Some(u) if u.role == Role::Student => u,
        Some(_) => {
            summary.errors.push(format!(
                "line {}: national id {} belongs to a non-student account",
                row.line, row.national_id
            ));
            return Ok(());
        }
        None => {
            if UserModel::email_taken(txn, &row.email, None).await? {
                summary.errors.push(format!(
                    "line {}: email {} is already in use",
                    row.line, row.email
                ));
                return Ok(());
            }
            let created = UserModel::create(
                txn,
                &row.name,
                &row.email,
                &row.national_id,
                Role::Student,
                Some(&row.national_id),
            )
            .await?;
            summary.created += 1;
            created
        }
    };

    if EnrollmentModel::is_enrolled(txn, student.id, course_id).await? {
        summary.skipped += 1;
    } else {
        EnrollmentModel::create(txn, student.id, course_id, period).await?;
        summary.enrolled += 1;
    }
    Ok(())
}
