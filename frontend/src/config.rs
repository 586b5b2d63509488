//! 编译期配置
//!
//! 所有值都来自 `option_env!`（可由 `build.rs` 从 `.env` 注入），缺失或无法解析时使用默认值。

use wms_shared::TOKEN_COOKIE_MAX_AGE_SECS;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5_000;
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub cookie_max_age_secs: u64,
    pub toast_duration_ms: u64,
    pub default_per_page: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cookie_max_age_secs: TOKEN_COOKIE_MAX_AGE_SECS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            option_env!("WMS_API_BASE_URL"),
            option_env!("WMS_COOKIE_MAX_AGE"),
            option_env!("WMS_TOAST_DURATION_MS"),
            option_env!("WMS_PER_PAGE"),
        )
    }

    fn resolve(
        base_url: Option<&str>,
        cookie_max_age: Option<&str>,
        toast_duration: Option<&str>,
        per_page: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            cookie_max_age_secs: parse_or("WMS_COOKIE_MAX_AGE", cookie_max_age, defaults.cookie_max_age_secs),
            toast_duration_ms: parse_or("WMS_TOAST_DURATION_MS", toast_duration, defaults.toast_duration_ms),
            default_per_page: parse_or("WMS_PER_PAGE", per_page, defaults.default_per_page)
                .max(1),
        }
    }
}

/// 读取 App 根部提供的配置
pub fn use_config() -> AppConfig {
    leptos::prelude::use_context::<AppConfig>().unwrap_or_default()
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, raw: Option<&str>, default: T) -> T {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {}={:?}", key, value);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::resolve(None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8081/api");
        assert_eq!(config.cookie_max_age_secs, 86_400);
        assert_eq!(config.toast_duration_ms, 5_000);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::resolve(
            Some(" https://wms.example.com/api "),
            Some("3600"),
            Some("2500"),
            Some("25"),
        );
        assert_eq!(config.api_base_url, "https://wms.example.com/api");
        assert_eq!(config.cookie_max_age_secs, 3600);
        assert_eq!(config.toast_duration_ms, 2500);
        assert_eq!(config.default_per_page, 25);
    }

    #[test]
    fn invalid_numbers_are_ignored() {
        let config = AppConfig::resolve(Some(""), Some("a day"), None, Some("0"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.cookie_max_age_secs, TOKEN_COOKIE_MAX_AGE_SECS);
        assert_eq!(config.default_per_page, 1);
    }
}
