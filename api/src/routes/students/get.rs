use axum::{
    Json,
    extract::{Query, State},
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
pub struct ListStudentsQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u64>,
    pub q: Option<String>,
}

/// GET /api/students
///
/// Students ordered by name, optionally filtered by `q` (name or email).
pub async fn list_students(
    State(app_state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> impl IntoResponse {
    if let Err(e) = query.validate() {
        return bad_request::<ListResponse<UserResponse>>(common::format_validation_errors(&e));
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(50);
    let filter = UserFilter {
        role: Some(Role::Student),
        q: query.q,
    };

    match UserModel::list(app_state.db(), &filter, page, per_page).await {
        Ok((students, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ListResponse {
                    items: students.into_iter().map(UserResponse::from).collect(),
                    page,
                    per_page,
                    total,
                },
                "Students retrieved successfully",
            )),
        ),
        Err(e) => db_error(e),
    }
}
