use serde::Deserialize;

/// Messages a dashboard may send on a course room.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourseRoomIncoming {
    /// Ask for the QR currently shown for the course.
    CurrentQr,
    /// Ask how many distinct users are watching the room.
    Viewers,
}
