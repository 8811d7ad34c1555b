#[cfg(test)]
mod tests {
    use crate::helpers::app::{Fixture, seed, token_for};
    use crate::helpers::{make_test_app, send};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::{Local, TimeZone, Utc};
    use db::models::{
        attendance::{Model as AttendanceModel, Registration},
        enrollment::Model as EnrollmentModel,
        user::{Model as UserModel, Role},
    };
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    /// Adds a third enrolled student and records a week of attendance:
    /// 2026-03-02 sam present, lia late; 2026-03-03 sam present.
    async fn seed_history(db: &DatabaseConnection, fx: &Fixture) -> UserModel {
        let lia = UserModel::create(db, "Lia, Jr.", "lia@test.io", "secret123", Role::Student, Some("1003"))
            .await
            .unwrap();
        EnrollmentModel::create(db, lia.id, fx.course.id, "2026-1")
            .await
            .unwrap();

        let day1 = Local.with_ymd_and_hms(2026, 3, 2, 8, 5, 0).unwrap();
        let day2 = Local.with_ymd_and_hms(2026, 3, 3, 8, 1, 0).unwrap();
        let start1 = day1.with_timezone(&Utc) - chrono::Duration::minutes(5);

        for (student_id, now, started_at) in [
            (fx.student.id, day1, start1),
            (lia.id, day1 + chrono::Duration::minutes(30), start1),
            (fx.student.id, day2, day2.with_timezone(&Utc)),
        ] {
            AttendanceModel::register(
                db,
                Registration {
                    student_id,
                    course_id: fx.course.id,
                    started_at,
                    now,
                    late_after_minutes: 15,
                },
            )
            .await
            .unwrap();
        }
        lia
    }

    #[tokio::test]
    async fn daily_lists_absent_students() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        seed_history(state.db(), &fx).await;
        let teacher = token_for(&fx.teacher);

        let (status, json) = send(
            &app,
            "GET",
            &format!("/api/attendance/daily?course_id={}&date=2026-03-03", fx.course.id),
            Some(&teacher),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Lia, Jr.");
        assert_eq!(rows[0]["status"], "absent");
        assert!(rows[0]["attendance_id"].is_null());
        assert_eq!(rows[1]["status"], "present");

        let (status, json) = send(&app, "GET", "/api/attendance/daily", Some(&teacher), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "course_id is required");

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/attendance/daily?course_id={}", fx.course.id),
            Some(&token_for(&fx.other_teacher)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn history_groups_by_day_newest_first() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        seed_history(state.db(), &fx).await;

        let (status, json) = send(
            &app,
            "GET",
            &format!(
                "/api/attendance/history?course_id={}&from=2026-03-01&to=2026-03-31",
                fx.course.id
            ),
            Some(&token_for(&fx.admin)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let days = json["data"].as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["date"], "2026-03-03");
        assert_eq!(days[0]["present"], 1);
        assert_eq!(days[0]["absent"], 1);
        assert_eq!(days[1]["date"], "2026-03-02");
        assert_eq!(days[1]["present"], 1);
        assert_eq!(days[1]["late"], 1);
        assert_eq!(days[1]["absent"], 0);
        assert_eq!(days[1]["total"], 2);

        let (status, _) = send(
            &app,
            "GET",
            &format!(
                "/api/attendance/history?course_id={}&from=2026-03-31&to=2026-03-01",
                fx.course.id
            ),
            Some(&token_for(&fx.admin)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn export_returns_csv_attachment() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        seed_history(state.db(), &fx).await;

        let req = Request::builder()
            .uri(format!(
                "/api/attendance/history/export?course_id={}&from=2026-03-01&to=2026-03-31",
                fx.course.id
            ))
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token_for(&fx.teacher)),
            )
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_owned();
        assert!(disposition.contains("attendance_NET-101_2026-03-01_2026-03-31.csv"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "date,time,student_id,student_name,national_id,status");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2026-03-03,08:01:00"));
        assert!(csv.contains("\"Lia, Jr.\",1003,late"));
    }

    #[tokio::test]
    async fn staff_override_and_delete_records() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let lia = seed_history(state.db(), &fx).await;
        let teacher = token_for(&fx.teacher);

        let record = AttendanceModel::find_for_day(
            state.db(),
            lia.id,
            fx.course.id,
            "2026-03-02".parse().unwrap(),
        )
        .await
        .unwrap()
        .unwrap();
        let uri = format!("/api/attendance/{}", record.id);

        let (status, json) = send(
            &app,
            "PUT",
            &uri,
            Some(&teacher),
            Some(serde_json::json!({ "status": "present" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "present");

        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(&teacher),
            Some(serde_json::json!({ "status": "sleeping" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "DELETE", &uri, Some(&token_for(&fx.other_teacher)), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "DELETE", &uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &uri, Some(&teacher), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
