#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{make_test_app, send};
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use db::models::{enrollment::Model as EnrollmentModel, user::Model as UserModel};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[tokio::test]
    async fn enroll_by_national_id() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let teacher = token_for(&fx.teacher);

        let (status, json) = send(
            &app,
            "POST",
            "/api/enrollments",
            Some(&teacher),
            Some(json!({ "course_id": fx.course.id, "national_id": "1002", "period": "2026-1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["student_id"], fx.outsider.id);
        assert_eq!(json["data"]["period"], "2026-1");

        let (status, json) = send(
            &app,
            "POST",
            "/api/enrollments",
            Some(&teacher),
            Some(json!({ "course_id": fx.course.id, "national_id": "1002" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Student is already enrolled in this course");

        let (status, _) = send(
            &app,
            "POST",
            "/api/enrollments",
            Some(&teacher),
            Some(json!({ "course_id": fx.course.id, "national_id": "0000" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/enrollments",
            Some(&token_for(&fx.other_teacher)),
            Some(json!({ "course_id": fx.course.id, "national_id": "1002" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unenroll_student() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let uri = format!("/api/enrollments/{}/{}", fx.course.id, fx.student.id);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) =
            send(&app, "DELETE", &uri, Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Enrollment not found");
    }

    async fn upload(app: &Router, token: &str, course_id: i64, csv: &str) -> (StatusCode, Value) {
        let boundary = "rollcall-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"course_id\"\r\n\r\n{course_id}\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"roster.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n{csv}\r\n--{boundary}--\r\n"
        );

        let req = Request::builder()
            .method("POST")
            .uri("/api/enrollments/import")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn import_creates_and_enrolls_students() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);

        let csv = "national_id,email,name,last_name\n\
                   1001,sam@test.io,Sam,Student\n\
                   2001,ana@test.io,Ana,Paz\n\
                   2002,tess@test.io,Clash,Email\n\
                   2003,broken-email,Bad,Row";
        let (status, json) = upload(&app, &admin, fx.course.id, csv).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["created"], 1);
        assert_eq!(json["data"]["enrolled"], 1);
        assert_eq!(json["data"]["skipped"], 1);
        assert_eq!(json["data"]["errors"].as_array().unwrap().len(), 2);

        let ana = UserModel::find_by_national_id(state.db(), "2001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ana.name, "Ana Paz");
        assert!(ana.verify_password("2001"));
        assert!(
            EnrollmentModel::is_enrolled(state.db(), ana.id, fx.course.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn import_is_admin_only_and_checks_course() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;

        let (status, _) = upload(&app, &token_for(&fx.teacher), fx.course.id, "1,a@x.io,A").await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = upload(&app, &token_for(&fx.admin), 9999, "1,a@x.io,A").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = upload(&app, &token_for(&fx.admin), fx.course.id, "\n\n").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
