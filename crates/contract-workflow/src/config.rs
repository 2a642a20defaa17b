//! Workflow configuration
//!
//! Generation limits and defaults, overridable from the environment.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_CONTENT_MAX_TOKENS: u32 = 4_000;
const DEFAULT_RISK_MAX_TOKENS: u32 = 1_500;
const DEFAULT_ANALYSIS_MAX_TOKENS: u32 = 2_000;
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Upper bound on each individual text-generation call
    pub generation_timeout: Duration,
    /// Token budget for the contract body
    pub content_max_tokens: u32,
    /// Token budget for the risk summary that accompanies a contract
    pub risk_max_tokens: u32,
    /// Token budget for a standalone risk analysis
    pub analysis_max_tokens: u32,
    /// Language used when the caller doesn't pick one
    pub default_language: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_millis(DEFAULT_GENERATION_TIMEOUT_MS),
            content_max_tokens: DEFAULT_CONTENT_MAX_TOKENS,
            risk_max_tokens: DEFAULT_RISK_MAX_TOKENS,
            analysis_max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Load configuration from environment variables
    ///
    /// Expected variables (all optional):
    /// - CONTRACT_GENERATION_TIMEOUT_MS: per-call timeout (default 60000)
    /// - CONTRACT_CONTENT_MAX_TOKENS: contract body budget (default 4000)
    /// - CONTRACT_RISK_MAX_TOKENS: risk summary budget (default 1500)
    /// - CONTRACT_ANALYSIS_MAX_TOKENS: risk analysis budget (default 2000)
    /// - CONTRACT_DEFAULT_LANGUAGE: language code (default "en")
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`WorkflowConfig::from_env`] but reading from any lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_ms: u64 = parse_var(&lookup, "CONTRACT_GENERATION_TIMEOUT_MS", DEFAULT_GENERATION_TIMEOUT_MS)?;
        if timeout_ms == 0 {
            return Err(anyhow!("CONTRACT_GENERATION_TIMEOUT_MS must be greater than zero"));
        }

        let default_language = lookup("CONTRACT_DEFAULT_LANGUAGE")
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        if default_language.is_empty() {
            return Err(anyhow!("CONTRACT_DEFAULT_LANGUAGE must not be empty"));
        }

        Ok(Self {
            generation_timeout: Duration::from_millis(timeout_ms),
            content_max_tokens: parse_var(&lookup, "CONTRACT_CONTENT_MAX_TOKENS", DEFAULT_CONTENT_MAX_TOKENS)?,
            risk_max_tokens: parse_var(&lookup, "CONTRACT_RISK_MAX_TOKENS", DEFAULT_RISK_MAX_TOKENS)?,
            analysis_max_tokens: parse_var(&lookup, "CONTRACT_ANALYSIS_MAX_TOKENS", DEFAULT_ANALYSIS_MAX_TOKENS)?,
            default_language,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WorkflowConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.generation_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let config = WorkflowConfig::from_lookup(lookup(&[
            ("CONTRACT_GENERATION_TIMEOUT_MS", "2500"),
            ("CONTRACT_CONTENT_MAX_TOKENS", " 8000 "),
            ("CONTRACT_DEFAULT_LANGUAGE", "DE"),
        ]))
        .unwrap();
        assert_eq!(config.generation_timeout, Duration::from_millis(2500));
        assert_eq!(config.content_max_tokens, 8000);
        assert_eq!(config.risk_max_tokens, DEFAULT_RISK_MAX_TOKENS);
        assert_eq!(config.default_language, "de");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = WorkflowConfig::from_lookup(lookup(&[("CONTRACT_RISK_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("CONTRACT_RISK_MAX_TOKENS"));

        assert!(WorkflowConfig::from_lookup(lookup(&[("CONTRACT_GENERATION_TIMEOUT_MS", "0")])).is_err());
        assert!(WorkflowConfig::from_lookup(lookup(&[("CONTRACT_DEFAULT_LANGUAGE", "  ")])).is_err());
    }
}
