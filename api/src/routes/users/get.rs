use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{Model as UserModel, Role, UserFilter};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{ListResponse, UserResponse, bad_request, db_error};

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u64>,
    pub role: Option<String>,
    /// Substring of name or email.
    pub q: Option<String>,
}

/// GET /api/users
///
/// Paginated users ordered by name. Filters: `role`, `q`.
///
/// - `200 OK` `{ items, page, per_page, total }`
/// - `400 Bad Request` invalid paging or unknown role
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return bad_request::<ListResponse<UserResponse>>(common::format_validation_errors(&e));
    }

    let role = match query.role.as_deref().filter(|r| !r.is_empty()) {
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => return bad_request(format!("Unknown role '{raw}'")),
        },
        None => None,
    };

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);
    let filter = UserFilter { role, q: query.q };

    match UserModel::list(app_state.db(), &filter, page, per_page).await {
        Ok((users, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ListResponse {
                    items: users.into_iter().map(UserResponse::from).collect(),
                    page,
                    per_page,
                    total,
                },
                "Users retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match UserModel::find_by_id(app_state.db(), user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("User not found")),
        ),
        Err(e) => db_error(e),
    }
}
