use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder};
use serde::Serialize;

use super::user;

/// A student's membership in a course for an academic period.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Period label such as `2026-2`.
    pub period: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Period label for `date`: first half of the year is `-1`, second half `-2`.
pub fn period_for(date: NaiveDate) -> String {
    let half = if date.month() <= 6 { 1 } else { 2 };
    format!("{}-{}", date.year(), half)
}

pub fn current_period() -> String {
    period_for(Local::now().date_naive())
}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        course_id: i64,
        period: &str,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            period: Set(period.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn is_enrolled<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        course_id: i64,
    ) -> Result<bool, DbErr> {
        let n = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    /// Removes the link; `false` when the student was not enrolled.
    pub async fn remove(db: &DbConn, course_id: i64, student_id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Roster of `course_id` ordered by student name.
    pub async fn students_of(
        db: &DbConn,
        course_id: i64,
    ) -> Result<Vec<(Model, user::Model)>, DbErr> {
        let rows = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .find_also_related(user::Entity)
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(e, u)| u.map(|u| (e, u)))
            .collect())
    }

    pub async fn count_for_course(db: &DbConn, course_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .count(db)
            .await
    }
}
