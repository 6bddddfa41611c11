//! Global dashboard configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from `.env` and environment variables. It
//! provides thread-safe access and mutation for tests or overrides from the CLI.

use std::env;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

/// Represents the complete dashboard configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stderr: bool,
    /// Base URL of the results server, without a trailing slash.
    pub server_url: String,
    /// Course used when a command does not name one explicitly.
    pub course: String,
    pub user_agent: String,
    /// Drop completions issued under a selection that is no longer current.
    pub discard_stale_results: bool,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn bool_var_or(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: "labdash".into(),
            log_level: "dashboard=info,result_client=info".into(),
            log_file: "labdash.log".into(),
            log_to_stderr: false,
            server_url: "http://127.0.0.1:8080".into(),
            course: String::new(),
            user_agent: concat!("labdash/", env!("CARGO_PKG_VERSION")).into(),
            discard_stale_results: true,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing or unparsable values fall back to [`AppConfig::default`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = AppConfig::default();

        Self {
            project_name: var_or("PROJECT_NAME", &defaults.project_name),
            log_level: var_or("LOG_LEVEL", &defaults.log_level),
            log_file: var_or("LOG_FILE", &defaults.log_file),
            log_to_stderr: bool_var_or("LOG_TO_STDERR", defaults.log_to_stderr),
            server_url: var_or("SERVER_URL", &defaults.server_url)
                .trim_end_matches('/')
                .to_string(),
            course: var_or("COURSE", &defaults.course),
            user_agent: var_or("USER_AGENT", &defaults.user_agent),
            discard_stale_results: bool_var_or(
                "DISCARD_STALE_RESULTS",
                defaults.discard_stale_results,
            ),
        }
    }

    fn lock() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// A poisoned lock is recovered rather than propagated; the config holds
    /// plain values and cannot be left half-written.
    pub fn global() -> RwLockReadGuard<'static, AppConfig> {
        Self::lock()
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns an owned copy of the global configuration.
    pub fn snapshot() -> AppConfig {
        Self::global().clone()
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap_or_else(|p| p.into_inner());
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = Self::lock().write().unwrap_or_else(|p| p.into_inner());
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stderr(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stderr = value);
    }

    /// Override `server_url`. A trailing slash is stripped.
    pub fn set_server_url(value: impl Into<String>) {
        let url: String = value.into();
        AppConfig::set_field(|cfg| cfg.server_url = url.trim_end_matches('/').to_string());
    }

    pub fn set_course(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.course = value.into());
    }

    pub fn set_user_agent(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.user_agent = value.into());
    }

    pub fn set_discard_stale_results(value: bool) {
        AppConfig::set_field(|cfg| cfg.discard_stale_results = value);
    }
}
