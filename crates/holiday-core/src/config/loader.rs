use super::types::{Config, LogLevel, ProviderKind};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const SEARCH_PATHS: [&str; 3] = [
    "./holiday.toml",
    "~/.holiday/config.toml",
    "~/.config/holiday/config.toml",
];

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.as_ref().to_string_lossy()).into_owned();
        let content = std::fs::read_to_string(&expanded)?;
        debug!(path = %expanded, "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// First config file found on the search path, or defaults.
    pub fn load_default() -> Result<Self> {
        for path in SEARCH_PATHS {
            let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
            if expanded.exists() {
                return Self::load_from_file(expanded);
            }
        }

        Ok(Config::default())
    }

    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a variable source; `merge_env` reads the process env.
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = var("HOLIDAY_LOG_LEVEL").and_then(|l| LogLevel::parse(&l)) {
            self.general.log_level = level;
        }

        if let Some(endpoint) = var("AZURE_OPENAI_ENDPOINT") {
            self.llm.provider = ProviderKind::Azure;
            self.llm.base_url = Some(endpoint);
        }
        if let Some(deployment) = var("AZURE_OPENAI_DEPLOYMENT") {
            self.llm.deployment = Some(deployment);
        }
        if let Some(version) = var("AZURE_OPENAI_API_VERSION") {
            self.llm.api_version = version;
        }

        let key_var = match self.llm.provider {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Azure => "AZURE_OPENAI_API_KEY",
        };
        if let Some(key) = var(key_var) {
            self.llm.api_key = Some(key);
        }

        if let Some(key) = var("CALENDARIFIC_API_KEY") {
            self.calendar.api_key = Some(key);
        }
        if let Some(url) = var("CALENDARIFIC_API_URL") {
            self.calendar.base_url = url;
        }

        self
    }
}
