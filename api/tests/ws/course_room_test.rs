#[cfg(test)]
mod tests {
    use crate::helpers::app::{seed, token_for};
    use crate::helpers::{connect_ws, make_test_app, send, spawn_server};
    use futures_util::{SinkExt, StreamExt};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::{Error, protocol::Message};

    async fn next_json<S>(ws: &mut S) -> Value
    where
        S: StreamExt<Item = Result<Message, Error>> + Unpin,
    {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
                .await
                .expect("timed out waiting for a frame")
                .expect("socket closed")
                .expect("socket error");
            if let Message::Text(txt) = msg {
                return serde_json::from_str(&txt).unwrap();
            }
        }
    }

    /// Skips frames until an event envelope named `name` arrives.
    async fn next_event<S>(ws: &mut S, name: &str) -> Value
    where
        S: StreamExt<Item = Result<Message, Error>> + Unpin,
    {
        loop {
            let v = next_json(ws).await;
            if v["type"] == "event" && v["event"] == name {
                return v;
            }
        }
    }

    #[tokio::test]
    async fn owner_receives_registration_events() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let addr = spawn_server(app.clone()).await;
        let teacher = token_for(&fx.teacher);

        let (mut ws, _) = connect_ws(
            &addr.to_string(),
            &format!("courses/{}", fx.course.id),
            &teacher,
        )
        .await
        .unwrap();

        let hello = next_json(&mut ws).await;
        assert_eq!(hello["type"], "qr");
        assert_eq!(hello["running"], false);

        let (_, json) = send(
            &app,
            "POST",
            "/api/attendance/qr",
            Some(&teacher),
            Some(json!({ "course_id": fx.course.id })),
        )
        .await;
        let qr_token = json["data"]["token"].as_str().unwrap().to_owned();

        let rotated = next_event(&mut ws, "qr.rotated").await;
        assert_eq!(rotated["payload"]["token"], qr_token);
        assert_eq!(
            rotated["topic"],
            format!("course:{}:attendance", fx.course.id)
        );

        let (status, _) = send(
            &app,
            "POST",
            "/api/attendance/register",
            Some(&token_for(&fx.student)),
            Some(json!({ "qr_token": qr_token })),
        )
        .await;
        assert_eq!(status, axum::http::StatusCode::CREATED);

        let registered = next_event(&mut ws, "attendance.registered").await;
        assert_eq!(registered["payload"]["student_id"], fx.student.id);
        assert_eq!(registered["payload"]["student_name"], "Sam Student");
        assert_eq!(registered["payload"]["status"], "present");
    }

    #[tokio::test]
    async fn app_ping_and_viewer_count() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let addr = spawn_server(app).await;

        let (mut ws, _) = connect_ws(
            &addr.to_string(),
            &format!("courses/{}", fx.course.id),
            &token_for(&fx.admin),
        )
        .await
        .unwrap();
        let _hello = next_json(&mut ws).await;

        ws.send(Message::Text(r#"{"type":"ping"}"#.into()))
            .await
            .unwrap();
        let pong = next_json(&mut ws).await;
        assert_eq!(pong["type"], "pong");

        ws.send(Message::Text(r#"{"type":"viewers"}"#.into()))
            .await
            .unwrap();
        let viewers = next_json(&mut ws).await;
        assert_eq!(viewers["type"], "viewers");
        assert_eq!(viewers["count"], 1);
    }

    #[tokio::test]
    async fn non_owners_cannot_join_the_room() {
        let (app, state) = make_test_app().await;
        let fx = seed(&state).await;
        let addr = spawn_server(app).await;
        let path = format!("courses/{}", fx.course.id);

        for token in [token_for(&fx.other_teacher), token_for(&fx.student)] {
            match connect_ws(&addr.to_string(), &path, &token).await {
                Err(Error::Http(resp)) => assert_eq!(resp.status(), 403),
                Err(other) => panic!("expected HTTP 403, got {other:?}"),
                Ok(_) => panic!("connection should have been refused"),
            }
        }

        match connect_ws(&addr.to_string(), &path, "bogus").await {
            Err(Error::Http(resp)) => assert_eq!(resp.status(), 401),
            Err(other) => panic!("expected HTTP 401, got {other:?}"),
            Ok(_) => panic!("connection should have been refused"),
        }
    }
}
