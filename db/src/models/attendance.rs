use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Timelike, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder, SqlErr};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use strum::{Display, EnumString};

use super::{course, enrollment, user};

/// One student's attendance in one course on one calendar day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Server-local calendar date.
    pub date: NaiveDate,
    /// Server-local time of the scan, whole seconds.
    pub time: NaiveTime,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "present")]
    Present,

    #[sea_orm(string_value = "late")]
    Late,

    #[sea_orm(string_value = "absent")]
    Absent,
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

/// Ways a QR registration can be refused once the token itself is valid.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("Course not found")]
    CourseNotFound,
    #[error("You are not enrolled in this course")]
    NotEnrolled,
    #[error("Attendance already registered for today")]
    AlreadyRegistered,
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// Input of [`Model::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub student_id: i64,
    pub course_id: i64,
    /// When the QR of this class was first shown.
    pub started_at: DateTime<Utc>,
    pub now: DateTime<Local>,
    pub late_after_minutes: i64,
}

/// `Late` once more than `late_after_minutes` have passed since the QR started.
pub fn status_for(started_at: DateTime<Utc>, now: DateTime<Utc>, late_after_minutes: i64) -> Status {
    if now.signed_duration_since(started_at) > Duration::minutes(late_after_minutes) {
        Status::Late
    } else {
        Status::Present
    }
}

/// Row of the daily roster report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub student_id: i64,
    pub name: String,
    pub national_id: Option<String>,
    pub attendance_id: Option<i64>,
    pub time: Option<NaiveTime>,
    pub status: Status,
}

/// Per-day totals of the history report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub present: u64,
    pub late: u64,
    pub absent: u64,
    pub total: u64,
}

impl Model {
    /// Records the scan of `reg.student_id` for today.
    ///
    /// Checks run in order: course exists, student enrolled, nothing recorded
    /// yet today. A concurrent duplicate that slips past the pre-check hits
    /// the unique index and is reported as `AlreadyRegistered` too.
    pub async fn register(db: &DbConn, reg: Registration) -> Result<Model, AttendanceError> {
        if course::Entity::find_by_id(reg.course_id).one(db).await?.is_none() {
            return Err(AttendanceError::CourseNotFound);
        }

        if !enrollment::Model::is_enrolled(db, reg.student_id, reg.course_id).await? {
            return Err(AttendanceError::NotEnrolled);
        }

        let date = reg.now.date_naive();
        if Self::find_for_day(db, reg.student_id, reg.course_id, date)
            .await?
            .is_some()
        {
            return Err(AttendanceError::AlreadyRegistered);
        }

        let status = status_for(
            reg.started_at,
            reg.now.with_timezone(&Utc),
            reg.late_after_minutes,
        );
        Self::insert_for_day(db, reg.student_id, reg.course_id, reg.now, status).await
    }

    /// Inserts the record for the day of `now`. The unique index on
    /// (course, student, date) turns a concurrent duplicate into
    /// `AlreadyRegistered`.
    async fn insert_for_day(
        db: &DbConn,
        student_id: i64,
        course_id: i64,
        now: DateTime<Local>,
        status: Status,
    ) -> Result<Model, AttendanceError> {
        let time = now.time().with_nanosecond(0).unwrap_or(now.time());

        let active = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            date: Set(now.date_naive()),
            time: Set(time),
            status: Set(status),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match active.insert(db).await {
            Ok(model) => Ok(model),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AttendanceError::AlreadyRegistered)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_for_day(
        db: &DbConn,
        student_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.eq(date))
            .one(db)
            .await
    }

    /// A student's own records, newest first, optionally for one course.
    pub async fn for_student(
        db: &DbConn,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<(Model, Option<course::Model>)>, DbErr> {
        let mut query = Entity::find().filter(Column::StudentId.eq(student_id));
        if let Some(course_id) = course_id {
            query = query.filter(Column::CourseId.eq(course_id));
        }
        query
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Time)
            .find_also_related(course::Entity)
            .all(db)
            .await
    }

    /// Records of `course_id` on `date` in scan order, with the student.
    pub async fn for_course_on(
        db: &DbConn,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<(Model, Option<user::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::Time)
            .order_by_asc(Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await
    }

    /// Records of `course_id` between two dates (inclusive), newest day first.
    pub async fn for_course_between(
        db: &DbConn,
        course_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(Model, Option<user::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.between(from, to))
            .order_by_desc(Column::Date)
            .order_by_asc(Column::Time)
            .order_by_asc(Column::Id)
            .find_also_related(user::Entity)
            .all(db)
            .await
    }

    /// Every enrolled student with their status on `date`; no record means `Absent`.
    pub async fn daily_report(
        db: &DbConn,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<DailyEntry>, DbErr> {
        let roster = enrollment::Model::students_of(db, course_id).await?;
        let records: HashMap<i64, Model> = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.eq(date))
            .all(db)
            .await?
            .into_iter()
            .map(|r| (r.student_id, r))
            .collect();

        Ok(roster
            .into_iter()
            .map(|(_, student)| {
                let record = records.get(&student.id);
                DailyEntry {
                    student_id: student.id,
                    name: student.name,
                    national_id: student.national_id,
                    attendance_id: record.map(|r| r.id),
                    time: record.map(|r| r.time),
                    status: record.map(|r| r.status).unwrap_or(Status::Absent),
                }
            })
            .collect())
    }

    /// Per-day counts for days with at least one record, newest first.
    ///
    /// Absences count enrolled students without a record as well as records
    /// explicitly marked absent.
    pub async fn history(
        db: &DbConn,
        course_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DaySummary>, DbErr> {
        let enrolled = enrollment::Model::count_for_course(db, course_id).await?;
        let records = Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.between(from, to))
            .all(db)
            .await?;

        let mut days: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
        for r in records {
            let entry = days.entry(r.date).or_default();
            match r.status {
                Status::Present => entry.0 += 1,
                Status::Late => entry.1 += 1,
                Status::Absent => entry.2 += 1,
            }
        }

        Ok(days
            .into_iter()
            .rev()
            .map(|(date, (present, late, marked_absent))| {
                let absent = marked_absent.max(enrolled.saturating_sub(present + late));
                DaySummary {
                    date,
                    present,
                    late,
                    absent,
                    total: present + late + absent,
                }
            })
            .collect())
    }

    pub async fn set_status(db: &DbConn, id: i64, status: Status) -> Result<Model, DbErr> {
        let record = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Attendance record not found".into()))?;
        let mut active: ActiveModel = record.into();
        active.status = Set(status);
        active.update(db).await
    }

    /// Deletes a record, returning it when it existed.
    pub async fn delete(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        let Some(record) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        Entity::delete_by_id(id).exec(db).await?;
        Ok(Some(record))
    }
}
