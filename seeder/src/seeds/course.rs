use crate::seed::Seeder;
use crate::seeds::user::TEACHER_EMAIL;
use db::models::{course, user};
use sea_orm::{DatabaseConnection, DbErr};

pub struct CourseSeeder;

const COURSES: [(&str, &str); 3] = [
    ("Computer Networks", "NET-101"),
    ("Operating Systems", "OS-201"),
    ("Databases", "DB-202"),
];

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let teacher = user::Model::find_by_email(db, TEACHER_EMAIL)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("teacher {TEACHER_EMAIL}")))?;

        for (name, code) in COURSES {
            if !course::Model::code_taken(db, code, None).await? {
                course::Model::create(db, name, code, teacher.id).await?;
            }
        }
        Ok(())
    }
}
