//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton holding
//! runtime configuration loaded from environment variables, with thread-safe
//! mutation for test overrides.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Complete application configuration loaded from environment variables.
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
    pub media_base_url: String,
    pub media_api_key: String,
    pub media_upload_folder: String,
    pub media_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and the process environment.
    ///
    /// Panics if a required variable is missing or malformed; configuration
    /// errors must abort startup rather than surface per-request.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "studymate".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("JWT_DURATION_MINUTES must be a number"),
            media_base_url: env::var("MEDIA_BASE_URL").expect("MEDIA_BASE_URL is required"),
            media_api_key: env::var("MEDIA_API_KEY").expect("MEDIA_API_KEY is required"),
            media_upload_folder: env::var("MEDIA_UPLOAD_FOLDER")
                .unwrap_or_else(|_| "studymate_uploads".into()),
            media_timeout_secs: env::var("MEDIA_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("MEDIA_TIMEOUT_SECS must be a number"),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "52428800".into())
                .parse()
                .expect("MAX_UPLOAD_BYTES must be a number"),
        }
    }

    /// Configuration used by test binaries; no environment required.
    pub fn test_defaults() -> Self {
        Self {
            env: "test".into(),
            project_name: "studymate".into(),
            log_level: "api=debug".into(),
            log_file: "api-test.log".into(),
            log_to_stdout: false,
            database_path: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret-key".into(),
            jwt_duration_minutes: 60,
            media_base_url: "http://127.0.0.1:0".into(),
            media_api_key: "test-key".into(),
            media_upload_folder: "studymate_test".into(),
            media_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn instance() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Snapshot of the current configuration.
    pub fn get() -> AppConfig {
        Self::instance().read().expect("config lock poisoned").clone()
    }

    /// Replaces the active configuration; used by tests before any accessor
    /// has been called with real environment expectations.
    pub fn override_config(new: AppConfig) {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(new.clone()));
        *lock.write().expect("config lock poisoned") = new;
    }
}

pub fn env() -> String {
    AppConfig::get().env
}

pub fn project_name() -> String {
    AppConfig::get().project_name
}

pub fn log_level() -> String {
    AppConfig::get().log_level
}

pub fn log_file() -> String {
    AppConfig::get().log_file
}

pub fn log_to_stdout() -> bool {
    AppConfig::get().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::get().database_path
}

pub fn host() -> String {
    AppConfig::get().host
}

pub fn port() -> u16 {
    AppConfig::get().port
}

pub fn jwt_secret() -> String {
    AppConfig::get().jwt_secret
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::get().jwt_duration_minutes
}

pub fn media_base_url() -> String {
    AppConfig::get().media_base_url
}

pub fn media_api_key() -> String {
    AppConfig::get().media_api_key
}

pub fn media_upload_folder() -> String {
    AppConfig::get().media_upload_folder
}

pub fn media_timeout_secs() -> u64 {
    AppConfig::get().media_timeout_secs
}

pub fn max_upload_bytes() -> usize {
    AppConfig::get().max_upload_bytes
}
