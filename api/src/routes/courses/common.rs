use db::models::user::{Model as UserModel, Role};
use sea_orm::{DbConn, DbErr};
use serde::Serialize;

/// A roster row of `GET /courses/{course_id}/students`.
#[derive(Debug, Serialize, Default)]
pub struct CourseStudent {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub national_id: Option<String>,
    pub period: String,
    pub enrolled_at: String,
}

/// `true` when `user_id` names an existing teacher.
pub async fn is_teacher(db: &DbConn, user_id: i64) -> Result<bool, DbErr> {
    Ok(UserModel::find_by_id(db, user_id)
        .await?
        .is_some_and(|u| u.role == Role::Teacher))
}
