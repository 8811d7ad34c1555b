#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{make_test_app, send};
    use api::auth::qr::issue_qr_token;
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use serial_test::serial;
    use util::config::AppConfig;

    #[tokio::test]
    async fn qr_lifecycle_for_course_owner() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let teacher = token_for(&fx.teacher);
        let qr_uri = format!("/api/attendance/qr/{}", fx.course.id);

        let (status, _) = send(&app, "GET", &qr_uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&teacher),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = json["data"]["token"].as_str().unwrap().to_owned();
        assert_eq!(json["data"]["course_id"], fx.course.id);
        assert!(json["data"]["rotation_seconds"].as_u64().unwrap() > 0);

        let (status, json) = send(&app, "GET", &qr_uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["token"], token);

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&token_for(&fx.other_teacher)),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&token_for(&fx.student)),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &qr_uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!state.qr().is_running(fx.course.id).await);

        let (status, json) = send(&app, "DELETE", &qr_uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "QR is not running for this course");
    }

    #[tokio::test]
    #[serial]
    async fn student_registers_once_per_day() {
        AppConfig::set_late_after_minutes(15);
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;

        let (_, json) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&token_for(&fx.teacher)),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        let qr_token = json["data"]["token"].as_str().unwrap().to_owned();
        let student = token_for(&fx.student);

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&student),
            Some(json!({ "qr_token": qr_token })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "present");
        assert_eq!(json["data"]["student_id"], fx.student.id);

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&student),
            Some(json!({ "qr_token": qr_token })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Attendance already registered for today");

        let (status, json) = send(&app, "GET", "/api/attendance/me", Some(&student), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["course_code"], "NET-101");
    }

    #[tokio::test]
    #[serial]
    async fn scan_after_threshold_is_late() {
        AppConfig::set_late_after_minutes(15);
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;

        let now = Utc::now();
        let (qr_token, _) = issue_qr_token(fx.course.id, now - Duration::minutes(40), now).unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&token_for(&fx.student)),
            Some(json!({ "qr_token": qr_token })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "late");
    }

    #[tokio::test]
    #[serial]
    async fn registration_rejections() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let now = Utc::now();
        let (valid, _) = issue_qr_token(fx.course.id, now, now).unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/register",
            None,
            Some(json!({ "qr_token": valid })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&token_for(&fx.teacher)),
            Some(json!({ "qr_token": valid })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let student = token_for(&fx.student);

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&student),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "QR token is required");

        let old = now - Duration::minutes(10);
        let (expired, _) = issue_qr_token(fx.course.id, old, old).unwrap();
        for bad in [expired.as_str(), "forged.token.value", student.as_str()] {
            let (status, json) = send(
                &app,
                "POST",
                "/api/attendance/register",
                Some(&student),
                Some(json!({ "qr_token": bad })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], "QR code is invalid or has expired");
        }

        let (status, json) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&token_for(&fx.outsider)),
            Some(json!({ "qr_token": valid })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You are not enrolled in this course");

        let (ghost, _) = issue_qr_token(9999, now, now).unwrap();
        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&student),
            Some(json!({ "qr_token": ghost })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
