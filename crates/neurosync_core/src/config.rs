use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeuroSyncConfig {
    pub llm: LlmConfig,
}

impl NeuroSyncConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: NeuroSyncConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("GEMINI_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("LLM_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.llm.timeout_secs = n,
                Err(_) => tracing::warn!("Ignoring non-numeric LLM_TIMEOUT_SECS={}", v),
            }
        }
        if let Ok(v) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(n) = v.parse() {
                self.llm.temperature = Some(n);
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "gemini" or "mock"
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    /// Name of the env var holding the service access key. The key itself never
    /// lives in the config file.
    pub api_key_env: String,
    /// Upper bound on one insight round trip.
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            base_url: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 30,
            temperature: None,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Credential
// ============================================================================

/// Raised before any request is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("access credential is missing (set {var})")]
    MissingCredential { var: String },
    #[error("unknown LLM provider '{0}'")]
    UnknownProvider(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Opaque service access key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// `var` only names the source for the error message.
    pub fn new(value: Option<String>, var: &str) -> Result<Self, ConfigurationError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(Self(v.trim().to_string())),
            _ => Err(ConfigurationError::MissingCredential {
                var: var.to_string(),
            }),
        }
    }

    pub fn from_env(var: &str) -> Result<Self, ConfigurationError> {
        Self::new(std::env::var(var).ok(), var)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ============================================================================
// Tests
// ============================================================================
