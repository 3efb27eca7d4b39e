//! Client and report configuration, read from the environment.

use crate::error::{RegObsError, Result};

/// RegObs v5 test API.
pub const DEFAULT_API_URL: &str = "https://test-api.regobs.no/v5";

/// Prefix of a human readable registration page; the registration id is appended.
pub const DEFAULT_REGISTRATION_URL: &str = "https://www.regobs.no/Registration/";

/// Tests from observers below this competence level are left out of reports.
pub const DEFAULT_MIN_COMPETENCE: i32 = 120;

/// Where and as whom to connect.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub app_token: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(
        api_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        app_token: impl Into<String>,
    ) -> Self {
        Self {
            api_url: normalize_base_url(api_url),
            username: username.into(),
            password: password.into(),
            app_token: app_token.into(),
        }
    }

    /// Read `REGOBS_API_URL`, `REGOBS_USERNAME`, `REGOBS_PASSWORD` and
    /// `REGOBS_APP_TOKEN`. Only the API URL has a default.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(None, None)
    }

    /// Like [`ClientConfig::from_env`], with explicit values taking precedence.
    pub fn from_env_with(api_url: Option<String>, username: Option<String>) -> Result<Self> {
        Self::from_lookup(|key| match key {
            "REGOBS_API_URL" if api_url.is_some() => api_url.clone(),
            "REGOBS_USERNAME" if username.is_some() => username.clone(),
            _ => std::env::var(key).ok(),
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RegObsError::Config(format!("{} is not set", key)))
        };
        let api_url = lookup("REGOBS_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Ok(Self::new(
            &api_url,
            required("REGOBS_USERNAME")?,
            required("REGOBS_PASSWORD")?,
            required("REGOBS_APP_TOKEN")?,
        ))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

/// Settings for the stratigraphy report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub registration_url: String,
    pub min_competence: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            registration_url: DEFAULT_REGISTRATION_URL.to_string(),
            min_competence: DEFAULT_MIN_COMPETENCE,
        }
    }
}

impl ReportConfig {
    /// Defaults, overridden by `REGOBS_REGISTRATION_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = std::env::var("REGOBS_REGISTRATION_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            config.registration_url = url;
        }
        config
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, DEFAULT_API_URL};
    use crate::error::RegObsError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_api_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("REGOBS_USERNAME", "ola"),
            ("REGOBS_PASSWORD", "secret"),
            ("REGOBS_APP_TOKEN", "token"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.endpoint("Account/Token"), "https://test-api.regobs.no/v5/Account/Token");
    }

    #[test]
    fn test_missing_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[("REGOBS_USERNAME", "ola")])).unwrap_err();
        assert!(matches!(err, RegObsError::Config(ref m) if m.contains("REGOBS_PASSWORD")));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.regobs.no/v5/", "u", "p", "t");
        assert_eq!(config.endpoint("/Registration"), "https://api.regobs.no/v5/Registration");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = ClientConfig::new(DEFAULT_API_URL, "ola", "hunter2", "apptoken");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("apptoken"));
    }
}
