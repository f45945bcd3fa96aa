//! Environment configuration and provider construction.

use anyhow::{Result, bail};
use sowkit_openai::{GPT4_TURBO, GPT4O_MINI, OpenAI};

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the client address exempt from quotas.
pub const HOME_IP_VAR: &str = "HOME_IP";
/// Environment variable overriding the provider base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Environment variable holding the log filter directives.
pub const LOG_VAR: &str = "RUST_LOG";
/// Log filter used when `RUST_LOG` is unset or blank.
pub const DEFAULT_LOG: &str = "info";

/// Log filter directives found through `lookup`, else [`DEFAULT_LOG`].
#[must_use]
pub fn log_filter(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_VAR)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG.to_string())
}

/// Settings read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Provider API key.
    pub api_key: String,
    /// Client address never rate limited.
    pub home_ip: Option<String>,
    /// Alternative OpenAI-compatible endpoint.
    pub base_url: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("home_ip", &self.home_ip)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if `OPENAI_API_KEY` is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Fails if `OPENAI_API_KEY` is missing or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let present = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let Some(api_key) = present(API_KEY_VAR) else {
            bail!("Missing {API_KEY_VAR} in environment or .env");
        };
        Ok(Self {
            api_key,
            home_ip: present(HOME_IP_VAR),
            base_url: present(BASE_URL_VAR),
        })
    }

    fn client(&self, model: &str) -> OpenAI {
        let mut builder = OpenAI::builder(&self.api_key).model(model);
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Client used for embeddings and library Q&A.
    #[must_use]
    pub fn assistant(&self) -> OpenAI {
        self.client(GPT4O_MINI)
    }

    /// Client used for SOW drafting.
    #[must_use]
    pub fn drafter(&self) -> OpenAI {
        self.client(GPT4_TURBO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(lookup(&[])), DEFAULT_LOG);
        assert_eq!(log_filter(lookup(&[(LOG_VAR, " ")])), DEFAULT_LOG);
        assert_eq!(log_filter(lookup(&[(LOG_VAR, "sowkit_rag=debug")])), "sowkit_rag=debug");
    }

    #[test]
    fn dotenv_values_reach_settings_and_log_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RUST_LOG=debug\nOPENAI_API_KEY=sk-from-file\n").unwrap();

        let vars: HashMap<String, String> = dotenv::from_path_iter(&path)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let from_file = |name: &str| vars.get(name).cloned();

        assert_eq!(log_filter(from_file), "debug");
        assert_eq!(Settings::from_lookup(from_file).unwrap().api_key, "sk-from-file");
    }

    #[test]
    fn api_key_is_required() {
        assert!(Settings::from_lookup(lookup(&[])).is_err());
        assert!(Settings::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).is_err());
    }

    #[test]
    fn optional_values() {
        let settings = Settings::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (HOME_IP_VAR, "203.0.113.7"),
            (BASE_URL_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.home_ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(settings.base_url, None);
    }

    #[test]
    fn models_per_use() {
        let settings = Settings::from_lookup(lookup(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(settings.assistant().model(), GPT4O_MINI);
        assert_eq!(settings.drafter().model(), GPT4_TURBO);
        assert!(!format!("{settings:?}").contains("sk-test"));
    }
}
