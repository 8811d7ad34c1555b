/// Room of a course's live attendance dashboard.
pub fn course_attendance_topic(course_id: i64) -> String {
    format!("course:{course_id}:attendance")
}
