//! Build-time Configuration
//!
//! Values are baked in at compile time with `option_env!`, e.g.
//! `API_BASE_URL=https://api.example.com/api trunk build`.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8800/api";
pub const DEFAULT_STORAGE_BUCKET: &str = "objective-dashboard.appspot.com";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST base, no trailing slash
    pub api_base_url: String,
    /// Object storage bucket for uploads
    pub storage_bucket: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("STORAGE_BUCKET"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(api_base_url: Option<&str>, storage_bucket: Option<&str>, log_level: Option<&str>) -> Self {
        fn pick(value: Option<&str>, default: &str) -> String {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            api_base_url: pick(api_base_url, DEFAULT_API_BASE_URL).trim_end_matches('/').to_string(),
            storage_bucket: pick(storage_bucket, DEFAULT_STORAGE_BUCKET),
            log_level: pick(log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_missing_or_blank_values() {
        let config = AppConfig::from_values(None, Some("  "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.storage_bucket, DEFAULT_STORAGE_BUCKET);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = AppConfig::from_values(Some("https://api.example.com/api/"), Some("bucket"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.storage_bucket, "bucket");
        assert_eq!(config.log_level, "debug");
    }
}
