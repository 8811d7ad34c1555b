pub mod m202601100001_create_users;
pub mod m202601100002_create_courses;
pub mod m202601100003_create_enrollments;
pub mod m202601100004_create_attendance;
