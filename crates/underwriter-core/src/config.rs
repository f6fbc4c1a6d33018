//! Runtime configuration shared by every front end.
//!
//! Parsing from files is left to the caller (the CLI reads YAML); this module
//! owns the shape, defaults and validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{UnderwriterError, UnderwriterResult};

/// Which implementation fills the verdict-composer role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStrategy {
    /// Deterministic rationale lines only.
    #[default]
    Rules,
    /// Rule verdict plus a narrative produced by an external generator.
    Generative,
}

impl FromStr for VerdictStrategy {
    type Err = UnderwriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "deterministic" => Ok(Self::Rules),
            "generative" | "narrative" => Ok(Self::Generative),
            other => Err(UnderwriterError::Config(format!(
                "unknown verdict strategy '{other}' (expected 'rules' or 'generative')"
            ))),
        }
    }
}

impl std::fmt::Display for VerdictStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rules => write!(f, "rules"),
            Self::Generative => write!(f, "generative"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictConfig {
    pub strategy: VerdictStrategy,
    /// Program invoked as the generative narrator. It receives the narrative
    /// request as JSON on stdin and prints the narrative on stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrator_command: Option<String>,
    pub narrator_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Unit label shown next to monetary snapshot figures.
    pub currency_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_label: "INR Cr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwriterConfig {
    pub verdict: VerdictConfig,
    pub report: ReportConfig,
}

impl UnderwriterConfig {
    /// Apply an optional strategy override (e.g. from an environment variable).
    pub fn with_strategy_override(mut self, strategy: Option<&str>) -> UnderwriterResult<Self> {
        if let Some(raw) = strategy {
            self.verdict.strategy = raw.parse()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> UnderwriterResult<()> {
        if self.verdict.strategy == VerdictStrategy::Generative
            && self
                .verdict
                .narrator_command
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(UnderwriterError::Config(
                "verdict.strategy is 'generative' but verdict.narrator_command is not set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UnderwriterConfig::default();
        assert_eq!(config.verdict.strategy, VerdictStrategy::Rules);
        assert_eq!(config.report.currency_label, "INR Cr");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: UnderwriterConfig =
            serde_json::from_str(r#"{ "verdict": { "strategy": "generative", "narrator_command": "narrate" } }"#)
                .unwrap();
        assert_eq!(config.verdict.strategy, VerdictStrategy::Generative);
        assert!(config.verdict.narrator_args.is_empty());
        assert_eq!(config.report, ReportConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generative_without_command_is_invalid() {
        let config = UnderwriterConfig::default()
            .with_strategy_override(Some("generative"))
            .unwrap();
        match config.validate() {
            Err(UnderwriterError::Config(msg)) => assert!(msg.contains("narrator_command")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("RULES".parse::<VerdictStrategy>().unwrap(), VerdictStrategy::Rules);
        assert_eq!(" generative ".parse::<VerdictStrategy>().unwrap(), VerdictStrategy::Generative);
        assert!("llm".parse::<VerdictStrategy>().is_err());
    }
}
