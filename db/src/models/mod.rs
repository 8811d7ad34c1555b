pub mod attendance;
pub mod course;
pub mod enrollment;
pub mod user;

pub use attendance::Entity as Attendance;
pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use user::Entity as User;
