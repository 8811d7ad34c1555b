use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{course::Model as CourseModel, user::Model as UserModel};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::db_error;
use crate::services::qr;

/// DELETE /api/users/{user_id}
///
/// Deletes a user with their enrollments and attendance. Deleting a teacher
/// also removes their courses and stops those courses' QR codes. Admins cannot
/// delete themselves.
///
/// - `200 OK`
/// - `403 Forbidden` deleting own account
/// - `404 Not Found`
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    if user.id() == user_id {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("You cannot delete your own account")),
        );
    }

    let taught = match CourseModel::ids_taught_by(app_state.db(), user_id).await {
        Ok(ids) => ids,
        Err(e) => return db_error(e),
    };

    match UserModel::delete(app_state.db(), user_id).await {
        Ok(true) => {
            qr::stop_many(app_state.qr(), app_state.ws(), &taught).await;
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "User deleted successfully")),
            )
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => db_error(e),
    }
}
