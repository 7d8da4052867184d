//! Configuration for Shiplog
//!
//! All configuration is explicit: values are read from the environment once
//! at startup and passed into the client constructors. Nothing mutates
//! process-wide state.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL (default: "https://api.github.com")
    pub api_base: String,

    /// Personal access token, sent as a bearer header when present
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

impl GithubConfig {
    /// Build from environment (GITHUB_TOKEN, SHIPLOG_GITHUB_API)
    pub fn from_env() -> Self {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        if token.is_some() {
            debug!("using GITHUB_TOKEN for authenticated requests");
        }

        let api_base = std::env::var("SHIPLOG_GITHUB_API")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "https://api.github.com".to_string());

        Self { api_base, token }
    }
}

/// Classifier endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat-completions-compatible base URL
    pub base_url: String,

    /// API key for the endpoint
    pub api_key: String,

    /// Model identifier
    pub model: String,
}

impl LlmConfig {
    /// Build from environment; `None` when no API key is configured, which
    /// disables the refinement pass.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SHIPLOG_LLM_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())?;

        let base_url = std::env::var("SHIPLOG_LLM_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        let model = std::env::var("SHIPLOG_LLM_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "gpt-4o-mini".to_string());

        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Pipeline tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum concurrent pull-request lookups
    pub pr_batch_size: usize,

    /// Percentage of `other` entries above which refinement runs
    pub refine_threshold_percent: usize,

    /// Minimum total entries before refinement is considered
    pub refine_min_entries: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pr_batch_size: 10,
            refine_threshold_percent: 60,
            refine_min_entries: 5,
        }
    }
}

/// Aggregate configuration
#[derive(Debug, Clone)]
pub struct ShiplogConfig {
    pub github: GithubConfig,
    pub llm: Option<LlmConfig>,
    pub pipeline: PipelineConfig,
}

impl ShiplogConfig {
    /// Build the full configuration from the environment
    pub fn from_env() -> Self {
        Self {
            github: GithubConfig::from_env(),
            llm: LlmConfig::from_env(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_github_config() {
        let config = GithubConfig::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.pr_batch_size, 10);
        assert_eq!(config.refine_threshold_percent, 60);
        assert_eq!(config.refine_min_entries, 5);
    }
}
