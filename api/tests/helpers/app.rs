use api::{auth::generate_jwt, routes::routes, ws::ws_routes};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use db::models::{
    course::Model as CourseModel,
    enrollment::Model as EnrollmentModel,
    user::{Model as UserModel, Role},
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use tower::ServiceExt;
use util::{config::AppConfig, state::AppState, ws::WebSocketManager};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Router over a fresh in-memory database, without the request logger
/// (it needs `ConnectInfo`).
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret(TEST_SECRET);

    let db = setup_test_db().await;
    let app_state = AppState::new(db, WebSocketManager::new());

    let router = Router::new()
        .nest("/api", routes(app_state.clone()))
        .nest("/ws", ws_routes(app_state.clone()));

    (router, app_state)
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Sends a request with an optional bearer token and JSON body; returns
/// status and parsed body (`Null` when the body is not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub fn token_for(user: &UserModel) -> String {
    generate_jwt(user.id, user.role).unwrap().0
}

/// One admin, two teachers, two students; `course` is taught by
/// `teacher` and has `student` enrolled.
pub struct Fixture {
    pub admin: UserModel,
    pub teacher: UserModel,
    pub other_teacher: UserModel,
    pub student: UserModel,
    pub outsider: UserModel,
    pub course: CourseModel,
}

pub async fn seed(app_state: &AppState) -> Fixture {
    let db = app_state.db();
    let admin = UserModel::create(db, "Admin", "admin@test.io", "secret123", Role::Admin, None)
        .await
        .unwrap();
    let teacher = UserModel::create(db, "Tess Teacher", "tess@test.io", "secret123", Role::Teacher, None)
        .await
        .unwrap();
    let other_teacher = UserModel::create(db, "Otto Teacher", "otto@test.io", "secret123", Role::Teacher, None)
        .await
        .unwrap();
    let student = UserModel::create(
        db,
        "Sam Student",
        "sam@test.io",
        "secret123",
        Role::Student,
        Some("1001"),
    )
    .await
    .unwrap();
    let outsider = UserModel::create(
        db,
        "Olga Outsider",
        "olga@test.io",
        "secret123",
        Role::Student,
        Some("1002"),
    )
    .await
    .unwrap();

    let course = CourseModel::create(db, "Networks", "NET-101", teacher.id)
        .await
        .unwrap();
    EnrollmentModel::create(db, student.id, course.id, "2026-2")
        .await
        .unwrap();

    Fixture {
        admin,
        teacher,
        other_teacher,
        student,
        outsider,
        course,
    }
}
