//! `/auth` routes.
//!
//! - `POST /auth/login` → `login`
//! - `GET /auth/me` → `get_me` (authenticated)

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use get::get_me;
use post::login;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(get_me).route_layer(from_fn(allow_authenticated)))
}
