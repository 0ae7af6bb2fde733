//! Application configuration. Backend endpoint, credentials, session defaults.

use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout. A stalled request would otherwise block the
/// rest of a submit batch indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend API root. Read from LESSON_SYNC_API_BASE_URL. Unset = in-memory demo backend.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Bearer token of the signed-in teacher. Read from LESSON_SYNC_API_TOKEN.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds; 0 disables it. Read from LESSON_SYNC_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Directory for attendance CSV reports. Read from LESSON_SYNC_REPORT_DIR.
    #[serde(default)]
    pub report_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Lesson session defaults (prompted for when missing)
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub class_id: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub period_id: Option<String>,

    #[serde(default)]
    pub program_id: Option<String>,

    /// Lesson date, `YYYY-MM-DD`. Defaults to today at the prompt.
    #[serde(default)]
    pub date: Option<String>,
}

/// Session fields known before the UI starts.
#[derive(Debug, Clone, Default)]
pub struct SessionDefaults {
    pub class_id: Option<String>,
    pub subject: Option<String>,
    pub period_id: Option<String>,
    pub program_id: Option<String>,
    pub date: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("LESSON_SYNC"));
        if let Ok(path) = std::env::var("LESSON_SYNC_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Per-request timeout. Defaults to 15s; `Some(0)` disables it.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn report_dir_or_default(&self) -> String {
        self.report_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }

    /// Returns the API base URL if a real backend is configured.
    pub fn api_base_url(&self) -> Option<String> {
        self.api_base_url
            .clone()
            .filter(|u| !u.trim().is_empty())
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            class_id: self.class_id.clone(),
            subject: self.subject.clone(),
            period_id: self.period_id.clone(),
            program_id: self.program_id.clone(),
            date: self.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_default_and_disable() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        cfg.request_timeout_secs = Some(0);
        assert_eq!(cfg.request_timeout(), None);
        cfg.request_timeout_secs = Some(3);
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_blank_base_url_means_demo() {
        let cfg = AppConfig {
            api_base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.api_base_url(), None);
    }
}
