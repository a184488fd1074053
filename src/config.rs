//! Endpoint configuration for the login delegate. Browser builds read it from
//! build-time environment variables with an optional runtime override from
//! `window.LOGIN_FORM_CONFIG`, so static deployments can change endpoints
//! without rebuilding. The CLI builds it from its arguments instead.
//! Configuration values are public; do not store secrets here.

use crate::errors::AppError;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/v1/auth/login";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub login_path: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(value) = option_env!("LOGIN_FORM_API_BASE_URL").and_then(normalize_runtime_value) {
            config.api_base_url = value;
        }
        if let Some(value) = option_env!("LOGIN_FORM_LOGIN_PATH").and_then(normalize_runtime_value) {
            config.login_path = value;
        }

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Absolute URL of the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the base URL or path cannot be parsed.
    pub fn login_url(&self) -> Result<Url, AppError> {
        let base = Url::parse(&self.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        base.join(&self.login_path)
            .map_err(|err| AppError::Config(format!("Invalid login path: {err}")))
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    login_path: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.login_path {
        config.login_path = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("LOGIN_FORM_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        login_path: read_runtime_value(&object, "login_path"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value};

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://auth.example.com "),
            Some("https://auth.example.com".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            login_path: normalize_runtime_value("  "),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://auth.example.com"),
            login_path: normalize_runtime_value("/session"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://auth.example.com");
        assert_eq!(config.login_path, "/session");
    }

    #[test]
    fn login_url_joins_base_and_path() {
        let config = AppConfig {
            api_base_url: "https://auth.example.com".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.login_url().unwrap().as_str(),
            "https://auth.example.com/v1/auth/login"
        );
    }

    #[test]
    fn login_url_rejects_relative_base() {
        let config = AppConfig {
            api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.login_url().is_err());
    }
}
