//! Configuration management
//!
//! `Settings` is read from TOML (see [`crate::paths`] for the lookup order),
//! then environment overrides are applied. Everything the core needs (the
//! catalog, severity weights, model options) is handed to it explicitly
//! from here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::adapters::toml::TomlRuleStore;
use crate::core::models::ServiceCatalog;
use crate::core::services::{AnalysisOptions, SeverityWeights};
use crate::paths;

/// API key variable
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Model name variable
pub const ENV_MODEL: &str = "ARCHSEC_MODEL";
/// Endpoint base URL variable
pub const ENV_BASE_URL: &str = "ARCHSEC_BASE_URL";
/// Rule file variable
pub const ENV_RULES: &str = "ARCHSEC_RULES";

/// Complete archsec configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Language model settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Compliance rule settings
    #[serde(default)]
    pub rules: RulesConfig,
    /// Severity weights for the risk score
    #[serde(default)]
    pub scoring: SeverityWeights,
    /// Supported cloud services
    #[serde(default)]
    pub services: ServiceCatalog,
}

/// Language model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer token; empty means unauthenticated
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Completion length cap
    pub max_tokens: u32,
    /// Temperature for the analysis call
    pub analysis_temperature: f32,
    /// Temperature for the correction call
    pub verification_temperature: f32,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 4000,
            analysis_temperature: 0.1,
            verification_temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

/// Compliance rule settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule file to load instead of the bundled set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Result cap for the general free-text rule query
    pub general_query_limit: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: None,
            general_query_limit: 10,
        }
    }
}

impl Settings {
    /// Parse settings from TOML content
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    /// Read settings from a file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load settings following the lookup order, then apply the environment
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match paths::config_candidates(cwd).into_iter().find(|p| p.is_file()) {
                Some(path) => {
                    log::debug!("Using configuration from {}", path.display());
                    Self::from_file(&path)?
                },
                None => Self::default(),
            },
        };
        settings.apply_env_from(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply overrides from a variable lookup; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.llm.api_key = key;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.llm.model = model;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.llm.base_url = url;
        }
        if let Some(path) = get(ENV_RULES) {
            self.rules.path = Some(PathBuf::from(path));
        }
    }

    /// Options for the analysis orchestrator
    #[must_use]
    pub const fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            temperature: self.llm.analysis_temperature,
            general_query_limit: self.rules.general_query_limit,
        }
    }

    /// The configured rule store
    pub fn rule_store(&self) -> anyhow::Result<TomlRuleStore> {
        match &self.rules.path {
            Some(path) => TomlRuleStore::from_file(path),
            None => TomlRuleStore::builtin(),
        }
    }
}
