pub mod course;
pub mod enrollment;
pub mod user;

/// Password of every seeded staff account.
pub const DEFAULT_PASSWORD: &str = "password123";
