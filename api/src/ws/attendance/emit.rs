use serde::Serialize;
use util::ws::WebSocketManager;

use super::payload;
use super::topics::course_attendance_topic;
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct AttendanceRegisteredEvent {
    #[serde(flatten)]
    pub payload: payload::AttendanceRegistered,
}
impl Event for AttendanceRegisteredEvent {
    const NAME: &'static str = "attendance.registered";
    fn topic_path(&self) -> String {
        course_attendance_topic(self.payload.course_id)
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceUpdatedEvent {
    #[serde(flatten)]
    pub payload: payload::AttendanceUpdated,
}
impl Event for AttendanceUpdatedEvent {
    const NAME: &'static str = "attendance.updated";
    fn topic_path(&self) -> String {
        course_attendance_topic(self.payload.course_id)
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceDeletedEvent {
    #[serde(flatten)]
    pub payload: payload::AttendanceDeleted,
}
impl Event for AttendanceDeletedEvent {
    const NAME: &'static str = "attendance.deleted";
    fn topic_path(&self) -> String {
        course_attendance_topic(self.payload.course_id)
    }
}

#[derive(Debug, Serialize)]
pub struct QrRotatedEvent {
    #[serde(flatten)]
    pub payload: payload::QrRotated,
}
impl Event for QrRotatedEvent {
    const NAME: &'static str = "qr.rotated";
    fn topic_path(&self) -> String {
        course_attendance_topic(self.payload.course_id)
    }
}

#[derive(Debug, Serialize)]
pub struct QrStoppedEvent {
    #[serde(flatten)]
    pub payload: payload::QrStopped,
}
impl Event for QrStoppedEvent {
    const NAME: &'static str = "qr.stopped";
    fn topic_path(&self) -> String {
        course_attendance_topic(self.payload.course_id)
    }
}

/* ---------- one-liner helpers ---------- */

pub async fn attendance_registered(ws: &WebSocketManager, p: payload::AttendanceRegistered) {
    envelope::emit(ws, &AttendanceRegisteredEvent { payload: p }).await;
}

pub async fn attendance_updated(ws: &WebSocketManager, p: payload::AttendanceUpdated) {
    envelope::emit(ws, &AttendanceUpdatedEvent { payload: p }).await;
}

pub async fn attendance_deleted(ws: &WebSocketManager, p: payload::AttendanceDeleted) {
    envelope::emit(ws, &AttendanceDeletedEvent { payload: p }).await;
}

pub async fn qr_rotated(ws: &WebSocketManager, p: payload::QrRotated) {
    envelope::emit(ws, &QrRotatedEvent { payload: p }).await;
}

pub async fn qr_stopped(ws: &WebSocketManager, course_id: i64) {
    envelope::emit(
        ws,
        &QrStoppedEvent {
            payload: payload::QrStopped { course_id },
        },
    )
    .await;
}
