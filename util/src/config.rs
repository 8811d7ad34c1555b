//! Global application configuration.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton loaded from
//! environment variables (and `.env` via `dotenvy`). Tests override individual
//! fields through the per-field setters.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Complete runtime configuration of the attendance server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// How often the QR of every started course is reissued.
    pub qr_rotation_seconds: u64,
    /// Lifetime of a single QR token. Kept above the rotation period so a code
    /// scanned right before a rotation still verifies.
    pub qr_token_ttl_seconds: u64,
    /// Minutes after the QR was started from which scans are recorded as late.
    pub late_after_minutes: i64,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Malformed numeric values fall back to their defaults. An empty
    /// `JWT_SECRET` is accepted here and rejected at server startup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/rollcall.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parsed_or("PORT", 3000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
            jwt_duration_minutes: parsed_or("JWT_DURATION_MINUTES", 720),
            qr_rotation_seconds: parsed_or("QR_ROTATION_SECONDS", 30),
            qr_token_ttl_seconds: parsed_or("QR_TOKEN_TTL_SECONDS", 45),
            late_after_minutes: parsed_or("LATE_AFTER_MINUTES", 15),
        }
    }

    /// Returns a read guard on the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Reloads the configuration from the environment, dropping overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_qr_rotation_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.qr_rotation_seconds = value);
    }

    pub fn set_qr_token_ttl_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.qr_token_ttl_seconds = value);
    }

    pub fn set_late_after_minutes(value: i64) {
        AppConfig::set_field(|cfg| cfg.late_after_minutes = value);
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn qr_rotation_seconds() -> u64 {
    AppConfig::global().qr_rotation_seconds.max(1)
}

/// Lifetime of a QR token. Never shorter than one rotation period plus a
/// second, so the code on screen always verifies until the next one replaces it.
pub fn qr_token_ttl_seconds() -> u64 {
    let floor = qr_rotation_seconds() + 1;
    AppConfig::global().qr_token_ttl_seconds.max(floor)
}

pub fn late_after_minutes() -> i64 {
    AppConfig::global().late_after_minutes
}
