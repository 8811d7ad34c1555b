use crate::seed::Seeder;
use db::models::{
    course::{self, CourseScope},
    enrollment,
    user::{Model as User, Role, UserFilter},
};
use sea_orm::{DatabaseConnection, DbErr};

pub struct EnrollmentSeeder;

/// Enrolls every student in every course for the current period.
#[async_trait::async_trait]
impl Seeder for EnrollmentSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let filter = UserFilter {
            role: Some(Role::Student),
            q: None,
        };
        let (students, _) = User::list(db, &filter, 1, 1000).await?;
        let courses = course::Model::list(db, CourseScope::All).await?;
        let period = enrollment::current_period();

        for (course, _) in &courses {
            for student in &students {
                if !enrollment::Model::is_enrolled(db, student.id, course.id).await? {
                    enrollment::Model::create(db, student.id, course.id, &period).await?;
                }
            }
        }
        log::debug!(
            "{} students enrolled in {} courses",
            students.len(),
            courses.len()
        );
        Ok(())
    }
}
