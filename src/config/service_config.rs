use crate::domain::ports::RemoteSettings;
use crate::utils::error::{InterpretError, Result};
use crate::utils::validation::{
    validate_api_key, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the remote chat-completions service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InterpretError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML, replacing `${VAR}` references with environment values first
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content, |name| std::env::var(name).ok());

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| InterpretError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.remote.normalize_api_key();
        Ok(config)
    }

    /// Builds the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut config = Self {
            remote: RemoteConfig {
                endpoint: lookup("MISTRAL_ENDPOINT").unwrap_or(defaults.remote.endpoint),
                api_key: lookup("MISTRAL_API_KEY"),
                model: lookup("MISTRAL_MODEL").unwrap_or(defaults.remote.model),
                temperature: parse_var(&lookup, "MISTRAL_TEMPERATURE")?
                    .unwrap_or(defaults.remote.temperature),
                max_tokens: parse_var(&lookup, "MISTRAL_MAX_TOKENS")?
                    .unwrap_or(defaults.remote.max_tokens),
                timeout_seconds: parse_var(&lookup, "MISTRAL_TIMEOUT_SECONDS")?
                    .unwrap_or(defaults.remote.timeout_seconds),
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.server.port),
            },
        };
        config.remote.normalize_api_key();
        Ok(config)
    }

    fn substitute_env_vars<F>(content: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("remote.endpoint", &self.remote.endpoint)?;
        validate_non_empty_string("remote.model", &self.remote.model)?;
        validate_range("remote.temperature", self.remote.temperature, 0.0, 2.0)?;
        validate_positive_number("remote.max_tokens", u64::from(self.remote.max_tokens), 1)?;
        validate_positive_number("remote.timeout_seconds", self.remote.timeout_seconds, 1)?;
        validate_non_empty_string("server.host", &self.server.host)?;

        match self.remote.api_key.as_deref() {
            Some(key) => validate_api_key("remote.api_key", key)?,
            None => tracing::warn!(
                "⚠️ No API key configured, every interpretation will be generated locally"
            ),
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl RemoteConfig {
    /// Drops empty keys and `${VAR}` placeholders that were never resolved.
    fn normalize_api_key(&mut self) {
        let unusable = self
            .api_key
            .as_deref()
            .map(|key| key.trim().is_empty() || ENV_VAR.is_match(key))
            .unwrap_or(false);

        if unusable {
            self.api_key = None;
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| InterpretError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl RemoteSettings for RemoteConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
