//! Lifecycle of the rotating attendance QR of each course.

use chrono::Utc;
use std::time::Duration;
use util::{
    config,
    qr::{QrEntry, QrRegistry},
    state::AppState,
    ws::WebSocketManager,
};

use crate::auth::qr::issue_qr_token;
use crate::ws::attendance::{emit, payload};

/// Starts the QR of `course_id`, or reissues it when already running.
///
/// The class start time is kept across reissues so lateness is measured from
/// the first time the code was shown.
pub async fn start_or_refresh(
    qr: &QrRegistry,
    ws: &WebSocketManager,
    course_id: i64,
    started_by: i64,
) -> Result<QrEntry, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let (started_at, started_by) = match qr.get(course_id).await {
        Some(running) => (running.started_at, running.started_by),
        None => (now, started_by),
    };

    let (token, expires_at) = issue_qr_token(course_id, started_at, now)?;
    let entry = QrEntry {
        course_id,
        token,
        started_at,
        issued_at: now,
        expires_at,
        started_by,
    };
    qr.put(entry.clone()).await;
    broadcast_rotation(ws, &entry).await;
    Ok(entry)
}

/// Stops the QR of `course_id`; `None` if it was not running.
pub async fn stop(qr: &QrRegistry, ws: &WebSocketManager, course_id: i64) -> Option<QrEntry> {
    let last = qr.remove(course_id).await?;
    emit::qr_stopped(ws, course_id).await;
    Some(last)
}

/// Stops the QR of each course in `course_ids`, e.g. after their teacher was deleted.
pub async fn stop_many(qr: &QrRegistry, ws: &WebSocketManager, course_ids: &[i64]) {
    for &course_id in course_ids {
        if stop(qr, ws, course_id).await.is_some() {
            tracing::info!(course_id, "QR stopped with its course");
        }
    }
}

/// Reissues the token of `course_id` if its QR is still running and
/// broadcasts the new code.
pub async fn rotate_one(
    qr: &QrRegistry,
    ws: &WebSocketManager,
    course_id: i64,
) -> Result<Option<QrEntry>, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let rotated = qr
        .refresh_if_running(course_id, |current| {
            let (token, expires_at) = issue_qr_token(course_id, current.started_at, now)?;
            Ok::<_, jsonwebtoken::errors::Error>(QrEntry {
                token,
                issued_at: now,
                expires_at,
                ..current.clone()
            })
        })
        .await?;

    if let Some(entry) = &rotated {
        broadcast_rotation(ws, entry).await;
    }
    Ok(rotated)
}

/// Reissues the token of every running course.
pub async fn rotate_all(qr: &QrRegistry, ws: &WebSocketManager) {
    for entry in qr.entries().await {
        match rotate_one(qr, ws, entry.course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => tracing::debug!(course_id = entry.course_id, "QR stopped before rotation"),
            Err(e) => {
                tracing::error!(course_id = entry.course_id, error = %e, "QR rotation failed")
            }
        }
    }
}

pub fn rotation_payload(entry: &QrEntry) -> payload::QrRotated {
    payload::QrRotated {
        course_id: entry.course_id,
        token: entry.token.clone(),
        expires_at: entry.expires_at.to_rfc3339(),
        started_at: entry.started_at.to_rfc3339(),
        rotation_seconds: config::qr_rotation_seconds(),
    }
}

async fn broadcast_rotation(ws: &WebSocketManager, entry: &QrEntry) {
    emit::qr_rotated(ws, rotation_payload(entry)).await;
}

/// Spawns the background task that rotates running QR codes every
/// `QR_ROTATION_SECONDS`.
pub fn spawn_qr_rotator(app_state: AppState) {
    let qr = app_state.qr_clone();
    let ws = app_state.ws_clone();

    tokio::spawn(async move {
        let period = Duration::from_secs(config::qr_rotation_seconds());
        let mut ticker = tokio::time::interval(period);
        // first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            rotate_all(&qr, &ws).await;
        }
    });
}
