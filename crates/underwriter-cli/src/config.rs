use std::fs;
use std::path::Path;

use underwriter_core::config::UnderwriterConfig;
use underwriter_core::verdict::{build_composer, NarrativeGenerator, VerdictComposer};

use crate::narrator::ExternalCommandNarrator;

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "uw.yaml";

/// Overrides `verdict.strategy` from whichever file was loaded.
pub const STRATEGY_ENV: &str = "UW_VERDICT_STRATEGY";

/// Load configuration from `path` (or `./uw.yaml` when present), then apply
/// the strategy override from the environment.
pub fn load_config(path: Option<&str>) -> Result<UnderwriterConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => read_yaml(Path::new(p))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => read_yaml(Path::new(DEFAULT_CONFIG_FILE))?,
        None => UnderwriterConfig::default(),
    };

    let strategy = std::env::var(STRATEGY_ENV).ok();
    let config = config.with_strategy_override(
        strategy.as_deref().filter(|s| !s.trim().is_empty()),
    )?;
    tracing::debug!(strategy = %config.verdict.strategy, "configuration loaded");
    Ok(config)
}

/// Build the verdict composer selected by `config`.
pub fn composer_from_config(
    config: &UnderwriterConfig,
) -> Result<Box<dyn VerdictComposer>, Box<dyn std::error::Error>> {
    config.validate()?;
    let generator = config.verdict.narrator_command.as_deref().map(|program| {
        Box::new(ExternalCommandNarrator::new(program, &config.verdict.narrator_args))
            as Box<dyn NarrativeGenerator>
    });
    Ok(build_composer(&config.verdict, generator)?)
}

fn read_yaml(path: &Path) -> Result<UnderwriterConfig, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
    let config = parse_yaml(&contents)
        .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?;
    Ok(config)
}

fn parse_yaml(contents: &str) -> Result<UnderwriterConfig, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(UnderwriterConfig::default());
    }
    serde_yaml::from_str(contents)
}
