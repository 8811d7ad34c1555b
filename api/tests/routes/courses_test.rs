#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{make_test_app, send};
    use axum::http::StatusCode;
    use db::models::course::Model as CourseModel;
    use serde_json::json;

    #[tokio::test]
    async fn course_list_is_scoped_by_role() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        CourseModel::create(state.db(), "Databases", "DB-201", fx.other_teacher.id)
            .await
            .unwrap();

        let (_, json) = send(&app, "GET", "/api/courses", Some(&token_for(&fx.admin)), None).await;
        let all = json["data"].as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["code"], "DB-201");

        let (_, json) =
            send(&app, "GET", "/api/courses", Some(&token_for(&fx.teacher)), None).await;
        let own = json["data"].as_array().unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0]["code"], "NET-101");
        assert_eq!(own[0]["teacher"]["name"], "Tess Teacher");

        let (_, json) =
            send(&app, "GET", "/api/courses", Some(&token_for(&fx.student)), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) =
            send(&app, "GET", "/api/courses", Some(&token_for(&fx.outsider)), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, "GET", "/api/courses", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn course_detail_is_limited_to_owner_and_admin() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let uri = format!("/api/courses/{}", fx.course.id);

        let (status, json) = send(&app, "GET", &uri, Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Networks");

        let (status, _) =
            send(&app, "GET", &uri, Some(&token_for(&fx.other_teacher)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", &uri, Some(&token_for(&fx.student)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) =
            send(&app, "GET", "/api/courses/9999", Some(&token_for(&fx.admin)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = send(
            &app,
            "GET",
            &format!("{uri}/students"),
            Some(&token_for(&fx.teacher)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["national_id"], "1001");
        assert_eq!(json["data"][0]["period"], "2026-2");
    }

    #[tokio::test]
    async fn create_course_validates_teacher_and_code() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);

        let (status, json) = send(
            &app,
            "POST",
            "/api/courses",
            Some(&admin),
            Some(json!({ "name": "Compilers", "code": "CMP-301", "teacher_id": fx.teacher.id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["teacher"]["id"], fx.teacher.id);

        let (status, json) = send(
            &app,
            "POST",
            "/api/courses",
            Some(&admin),
            Some(json!({ "name": "Again", "code": "CMP-301", "teacher_id": fx.teacher.id })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "A course with this code already exists");

        let (status, _) = send(
            &app,
            "POST",
            "/api/courses",
            Some(&admin),
            Some(json!({ "name": "Bad", "code": "BAD-1", "teacher_id": fx.student.id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/courses",
            Some(&admin),
            Some(json!({ "name": "No teacher", "code": "NT-1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/courses",
            Some(&token_for(&fx.teacher)),
            Some(json!({ "name": "Mine", "code": "MINE-1", "teacher_id": fx.teacher.id })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn update_and_delete_course() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let admin = token_for(&fx.admin);
        let uri = format!("/api/courses/{}", fx.course.id);

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(&admin),
            Some(json!({ "teacher_id": fx.other_teacher.id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["teacher_id"], fx.other_teacher.id);
        assert_eq!(json["data"]["code"], "NET-101");

        let (status, _) = send(&app, "GET", &uri, Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
