#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{make_test_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn only_admins_manage_users() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;

        let (status, _) =
            send(&app, "GET", "/api/users", Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) =
            send(&app, "GET", "/api/users", Some(&token_for(&fx.admin)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 5);
    }

    #[tokio::test]
    async fn list_filters_by_role_and_text() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);

        let (_, json) = send(&app, "GET", "/api/users?role=teacher", Some(&admin), None).await;
        assert_eq!(json["data"]["total"], 2);

        let (_, json) = send(&app, "GET", "/api/users?q=olga", Some(&admin), None).await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["items"][0]["name"], "Olga Outsider");

        let (status, _) = send(&app, "GET", "/api/users?role=janitor", Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/users?per_page=0", Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_update_and_conflicts() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);

        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({
                "name": "New Teacher",
                "email": "new@test.io",
                "password": "secret123",
                "role": "teacher"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["role"], "teacher");
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = send(
            &app,
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({
                "name": "Dup",
                "email": "new@test.io",
                "password": "secret123",
                "role": "student"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let (status, _) = send(
            &app,
            "POST",
            "/api/users",
            Some(&admin),
            Some(json!({
                "name": "Dup Id",
                "email": "dupid@test.io",
                "password": "secret123",
                "role": "student",
                "national_id": "1001"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(&admin),
            Some(json!({ "name": "Renamed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Renamed");
        assert_eq!(json["data"]["email"], "new@test.io");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/users/{id}"),
            Some(&admin),
            Some(json!({ "email": "tess@test.io" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/users/9999",
            Some(&admin),
            Some(json!({ "name": "Ghost" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_refuses_self_and_cascades() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);

        let (status, json) = send(
            &app,
            "DELETE",
            &format!("/api/users/{}", fx.admin.id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "You cannot delete your own account");

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/users/{}", fx.student.id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/courses/{}/students", fx.course.id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/users/{}", fx.student.id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_a_teacher_stops_their_running_qr() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&token_for(&fx.teacher)),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.qr().is_running(fx.course.id).await);

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/users/{}", fx.teacher.id),
            Some(&token_for(&fx.admin)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        assert!(!state.qr().is_running(fx.course.id).await);
        assert!(state.qr().entries().await.is_empty());

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/courses/{}", fx.course.id),
            Some(&token_for(&fx.admin)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
