use crate::seed::Seeder;
use crate::seeds::DEFAULT_PASSWORD;
use db::models::user::{Model, Role};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const TEACHER_EMAIL: &str = "teacher@example.com";
pub const STUDENT_EMAIL: &str = "student@example.com";

const RANDOM_STUDENTS: usize = 12;

async fn ensure_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    national_id: Option<&str>,
) -> Result<(), DbErr> {
    if Model::email_taken(db, email, None).await? {
        return Ok(());
    }
    if let Some(nid) = national_id {
        if Model::national_id_taken(db, nid, None).await? {
            return Ok(());
        }
    }
    Model::create(db, name, email, password, role, national_id).await?;
    Ok(())
}

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        ensure_user(db, "Admin", ADMIN_EMAIL, DEFAULT_PASSWORD, Role::Admin, None).await?;
        ensure_user(
            db,
            "Default Teacher",
            TEACHER_EMAIL,
            DEFAULT_PASSWORD,
            Role::Teacher,
            None,
        )
        .await?;
        // Students sign in with their national id as password, like imported ones.
        ensure_user(
            db,
            "Default Student",
            STUDENT_EMAIL,
            "1700000001",
            Role::Student,
            Some("1700000001"),
        )
        .await?;

        for _ in 0..RANDOM_STUDENTS {
            let first: String = FirstName().fake();
            let last: String = LastName().fake();
            let national_id = format!("17{:08}", fastrand::u32(..100_000_000));
            let email = format!(
                "{}.{}{}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                fastrand::u16(..1000)
            );
            ensure_user(
                db,
                &format!("{first} {last}"),
                &email,
                &national_id,
                Role::Student,
                Some(&national_id),
            )
            .await?;
        }
        log::debug!("users seeded");
        Ok(())
    }
}
