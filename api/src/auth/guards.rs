use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::course;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

pub type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

fn deny(status: StatusCode, message: &str) -> GuardError {
    (status, Json(ApiResponse::error(message)))
}

/// Validates the caller and stores `AuthUser` in the request extensions.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), GuardError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| deny(StatusCode::UNAUTHORIZED, "Authentication required"))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Loads `course_id` and checks that `user` may manage it: admins always,
/// teachers only for courses they own.
///
/// Database errors deny access.
pub async fn ensure_course_staff(
    db: &DatabaseConnection,
    user: &AuthUser,
    course_id: i64,
) -> Result<course::Model, GuardError> {
    if user.is_student() {
        return Err(deny(
            StatusCode::FORBIDDEN,
            "Teacher or admin access required",
        ));
    }

    let course = match course::Model::find_by_id(db, course_id).await {
        Ok(Some(c)) => c,
        Ok(None) => return Err(deny(StatusCode::NOT_FOUND, "Course not found")),
        Err(e) => {
            tracing::warn!(error = %e, course_id, "DB error while loading course; denying access");
            return Err(deny(StatusCode::INTERNAL_SERVER_ERROR, "Database error"));
        }
    };

    if user.is_admin() || course.is_taught_by(user.id()) {
        Ok(course)
    } else {
        Err(deny(
            StatusCode::FORBIDDEN,
            "You do not have access to this course",
        ))
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, _user) = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_admin() {
        return Err(deny(StatusCode::FORBIDDEN, "Admin access required"));
    }

    Ok(next.run(req).await)
}

/// Admins and teachers.
pub async fn allow_staff(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if user.is_student() {
        return Err(deny(
            StatusCode::FORBIDDEN,
            "Teacher or admin access required",
        ));
    }

    Ok(next.run(req).await)
}

/// Students only.
pub async fn allow_student(req: Request<Body>, next: Next) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.is_student() {
        return Err(deny(StatusCode::FORBIDDEN, "Student access required"));
    }

    Ok(next.run(req).await)
}

/// Admins, or the teacher owning the course named by the `course_id` path parameter.
pub async fn allow_course_staff(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    let course_id = params
        .get("course_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| deny(StatusCode::BAD_REQUEST, "Missing or invalid course_id"))?;

    ensure_course_staff(app_state.db(), &user, course_id).await?;
    Ok(next.run(req).await)
}
