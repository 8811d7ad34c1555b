use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveValue::Set, Condition, ConnectionTrait, PaginatorTrait, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// National identity number, used to link students to course rosters.
    pub national_id: Option<String>,
    /// Identifier of the phone a student scans with.
    pub device_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "student")]
    Student,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
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

/// Filters for [`Model::list`].
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub role: Option<Role>,
    /// Case-insensitive substring of name or email.
    pub q: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub national_id: Option<String>,
    pub device_id: Option<String>,
}

impl Model {
    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))
    }

    /// Checks `password` against the stored hash. A malformed hash never verifies.
    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        national_id: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let active = ActiveModel {
            name: Set(name.trim().to_owned()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(Self::hash_password(password)?),
            role: Set(role),
            national_id: Set(national_id
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned)),
            device_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }

    pub async fn find_by_national_id<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::NationalId.eq(national_id.trim()))
            .one(db)
            .await
    }

    /// Whether another user (not `except`) already uses `email`.
    pub async fn email_taken<C: ConnectionTrait>(
        db: &C,
        email: &str,
        except: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::Email.eq(email.trim().to_lowercase()));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// Whether another user (not `except`) already uses `national_id`.
    pub async fn national_id_taken<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
        except: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut query = Entity::find().filter(Column::NationalId.eq(national_id.trim()));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        Ok(query.count(db).await? > 0)
    }

    /// One page of users ordered by name, plus the total number of matches.
    pub async fn list(
        db: &DbConn,
        filter: &UserFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Model>, u64), DbErr> {
        let mut query = Entity::find();

        if let Some(role) = filter.role {
            query = query.filter(Column::Role.eq(role));
        }
        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", q.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Email))).like(pattern)),
            );
        }

        let paginator = query
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .paginate(db, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.max(1) - 1).await?;
        Ok((items, total))
    }

    pub async fn update(db: &DbConn, id: i64, changes: UserChanges) -> Result<Model, DbErr> {
        let user = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".into()))?;
        let mut active: ActiveModel = user.into();

        if let Some(name) = changes.name {
            active.name = Set(name.trim().to_owned());
        }
        if let Some(email) = changes.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(password) = changes.password {
            active.password_hash = Set(Self::hash_password(&password)?);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        if let Some(national_id) = changes.national_id {
            let trimmed = national_id.trim();
            active.national_id = Set((!trimmed.is_empty()).then(|| trimmed.to_owned()));
        }
        if let Some(device_id) = changes.device_id {
            active.device_id = Set(Some(device_id));
        }

        active.updated_at = Set(Utc::now());
        active.update(db).await
    }

    /// Deletes the user together with their enrollments and attendance records.
    ///
    /// Returns `false` when no such user exists.
    pub async fn delete(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let txn = db.begin().await?;

        super::attendance::Entity::delete_many()
            .filter(super::attendance::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        super::enrollment::Entity::delete_many()
            .filter(super::enrollment::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        let res = Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
