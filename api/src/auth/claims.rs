use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.sub
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    pub fn is_teacher(&self) -> bool {
        self.0.role == Role::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.0.role == Role::Student
    }
}
