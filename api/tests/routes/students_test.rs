#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{make_test_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn staff_list_and_edit_students() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let teacher = token_for(&fx.teacher);

        let (status, json) = send(&app, "GET", "/api/students", Some(&teacher), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);

        let (status, _) =
            send(&app, "GET", "/api/students", Some(&token_for(&fx.student)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/students/{}", fx.student.id),
            Some(&teacher),
            Some(json!({ "name": "Samuel Student" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["name"], "Samuel Student");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/students/{}", fx.student.id),
            Some(&teacher),
            Some(json!({ "national_id": "1002" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/students/{}", fx.teacher.id),
            Some(&teacher),
            Some(json!({ "name": "Not a student" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_admin_deletes_students() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let uri = format!("/api/students/{}", fx.outsider.id);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token_for(&fx.teacher)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token_for(&fx.admin)), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token_for(&fx.admin)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
