use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded,
/// and shared by value inside the application state so every component sees
/// the same timings and paths.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the logging format in main.
    pub env: Env,
    // Directory backing the file storage provider (the local-storage analogue).
    pub storage_dir: PathBuf,
    // Debounce delay applied to raw search input before a commit fires.
    pub debounce: Duration,
    // Simulated network latency for the auth facade's login/signup calls.
    pub auth_latency: Duration,
    // Scale factor (percent) applied to the catalog's per-operation latencies.
    // 100 keeps the original timings; 0 makes facade calls resolve immediately.
    pub latency_percent: u32,
}

/// Env
///
/// Defines the runtime context, used to switch the logging setup between the
/// human-readable local format and the JSON format for log aggregators.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Provides a safe, non-panicking AppConfig primarily used for test setup:
    /// original timings, storage under a relative scratch directory.
    fn default() -> Self {
        Self {
            env: Env::Local,
            storage_dir: PathBuf::from(".portal-storage"),
            debounce: Duration::from_millis(300),
            auth_latency: Duration::from_millis(1000),
            latency_percent: 100,
        }
    }
}

impl AppConfig {
    /// The canonical function for initializing the configuration at startup.
    /// Every knob has a sensible default, so a bare environment boots the demo
    /// with the original timings; variables only override.
    ///
    /// Recognized variables: `APP_ENV` (`local`/`production`), `STORAGE_DIR`,
    /// `DEBOUNCE_MS`, `AUTH_LATENCY_MS`, `LATENCY_PERCENT`.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();

        Self {
            env,
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            debounce: millis_var("DEBOUNCE_MS").unwrap_or(defaults.debounce),
            auth_latency: millis_var("AUTH_LATENCY_MS").unwrap_or(defaults.auth_latency),
            latency_percent: env::var("LATENCY_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.latency_percent),
        }
    }
}

/// Parses an environment variable holding a millisecond count. Unset or
/// unparsable values fall back to the caller's default.
fn millis_var(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}
