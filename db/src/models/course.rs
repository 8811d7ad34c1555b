use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, JoinType, PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait};
use serde::Serialize;

use super::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique course code, e.g. `MAT-101`.
    pub code: String,
    /// Owning teacher.
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Which courses a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseScope {
    All,
    TaughtBy(i64),
    EnrolledBy(i64),
}

#[derive(Debug, Default, Clone)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub teacher_id: Option<i64>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        name: &str,
        code: &str,
        teacher_id: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            name: Set(name.trim().to_owned()),
            code: Set(code.trim().to_owned()),
            teacher_id: Set(teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn code_taken(db: &DbConn, code: &str, except: Option<i64>) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Code.eq(code.trim()));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// Courses visible in `scope`, newest first, each with its teacher.
    pub async fn list(
        db: &DbConn,
        scope: CourseScope,
    ) -> Result<Vec<(Model, Option<user::Model>)>, DbErr> {
        let mut query = Entity::find();

        match scope {
            CourseScope::All => {}
            CourseScope::TaughtBy(teacher_id) => {
                query = query.filter(Column::TeacherId.eq(teacher_id));
            }
            CourseScope::EnrolledBy(student_id) => {
                query = query
                    .join(JoinType::InnerJoin, Relation::Enrollments.def())
                    .filter(super::enrollment::Column::StudentId.eq(student_id));
            }
        }

        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await
    }

    /// Ids of the courses owned by `teacher_id`.
    pub async fn ids_taught_by(db: &DbConn, teacher_id: i64) -> Result<Vec<i64>, DbErr> {
        Entity::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::TeacherId.eq(teacher_id))
            .into_tuple::<i64>()
            .all(db)
            .await
    }

    pub fn is_taught_by(&self, user_id: i64) -> bool {
        self.teacher_id == user_id
    }

    pub async fn update(db: &DbConn, id: i64, changes: CourseChanges) -> Result<Model, DbErr> {
        let course = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Course not found".into()))?;
        let mut active: ActiveModel = course.into();

        if let Some(name) = changes.name {
            active.name = Set(name.trim().to_owned());
        }
        if let Some(code) = changes.code {
            active.code = Set(code.trim().to_owned());
        }
        if let Some(teacher_id) = changes.teacher_id {
            active.teacher_id = Set(teacher_id);
        }
        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Deletes the course with its roster and attendance.
    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let txn = db.begin().await?;
        super::attendance::Entity::delete_many()
            .filter(super::attendance::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        super::enrollment::Entity::delete_many()
            .filter(super::enrollment::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        let res = Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
