//! `/users` routes. The whole group is admin-only (see `routes::routes`).
//!
//! - `GET /users` → `list_users`
//! - `POST /users` → `create_user`
//! - `GET /users/{user_id}` → `get_user`
//! - `PUT /users/{user_id}` → `update_user`
//! - `DELETE /users/{user_id}` → `delete_user`

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_users))
        .route("/", post(post::create_user))
        .route("/{user_id}", get(get::get_user))
        .route("/{user_id}", put(put::update_user))
        .route("/{user_id}", delete(delete::delete_user))
}
