//! Configuration system for the linter
//!
//! Reads configuration from:
//! - `.aselintrc.yaml` / `.aselintrc.json` (project-level)
//! - `~/.aselintrc.yaml` (user-level)

use crate::diagnostic::Severity;
use crate::error::LintError;
use crate::rules::RuleKind;
use crate::table::{RuleTable, TableConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names searched by [`Config::load_default`], in order
pub const CONFIG_NAMES: [&str; 5] = [
    ".aselintrc.yaml",
    ".aselintrc.yml",
    ".aselintrc.json",
    "aselint.yaml",
    "aselint.json",
];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lint files in parallel
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Verbose output
    pub verbose: bool,

    /// Show the summary line
    pub statistics: bool,

    /// Show suggested replacements
    pub suggestions: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
            suggestions: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled rules
    pub disabled: Vec<String>,

    /// Severity overrides (rule_id -> severity)
    pub severity: HashMap<String, Severity>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine settings
    pub engine: EngineConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Rule configuration
    pub rules: RulesConfig,

    /// Rule table; missing keys take the ASE defaults
    pub table: TableConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::find_in(Path::new(".")) {
            return Self::load(&path);
        }

        if let Some(home) = dirs::home_dir() {
            if let Some(path) = Self::find_in(&home) {
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }

    /// First known config file in a directory
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Reject rule IDs that name no family
    fn validate(&self) -> Result<(), ConfigError> {
        let ids = self
            .rules
            .disabled
            .iter()
            .chain(self.rules.severity.keys());
        for id in ids {
            id.parse::<RuleKind>().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        verbose: Option<bool>,
        jobs: Option<usize>,
        disabled_rules: Option<Vec<String>>,
        max_lines: Option<usize>,
    ) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if let Some(v) = verbose {
            self.output.verbose = v;
        }
        if let Some(j) = jobs {
            self.engine.jobs = j;
        }
        if let Some(disabled) = disabled_rules {
            self.rules.disabled.extend(disabled);
        }
        if let Some(max_lines) = max_lines {
            self.table
                .thresholds
                .set_max_lines(RuleKind::Spacing, Some(max_lines));
        }
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        let Ok(kind) = rule_id.parse::<RuleKind>() else {
            return false;
        };
        !self
            .rules
            .disabled
            .iter()
            .any(|id| id.parse::<RuleKind>() == Ok(kind))
    }

    /// Get severity override for a rule, under any of its names
    pub fn get_severity_override(&self, kind: RuleKind) -> Option<Severity> {
        self.rules
            .severity
            .iter()
            .find(|(id, _)| id.parse::<RuleKind>() == Ok(kind))
            .map(|(_, severity)| *severity)
    }

    /// Validate and compile the rule table
    pub fn rule_table(&self) -> Result<RuleTable, LintError> {
        RuleTable::new(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::BracketStrategy;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.engine.parallel);
        assert_eq!(config.engine.jobs, 0);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.statistics);
        assert!(config.output.suggestions);
        assert_eq!(config.table, TableConfig::default());
    }

    #[test]
    fn test_load_yaml_config() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            r#"
engine:
  parallel: false
  jobs: 4
output:
  format: json
rules:
  disabled:
    - notation
  severity:
    casing: error
table:
  keywords: [itemcount]
  bracket_strategy: strict
  thresholds:
    spacing: 100
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.jobs, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.is_rule_enabled("notation"));
        assert!(config.is_rule_enabled("casing"));
        assert_eq!(
            config.get_severity_override(RuleKind::Casing),
            Some(Severity::Error)
        );
        assert_eq!(config.get_severity_override(RuleKind::Spacing), None);
        assert_eq!(config.table.keywords, vec!["itemcount"]);
        assert_eq!(config.table.bracket_strategy, BracketStrategy::Strict);
        assert_eq!(config.table.thresholds.spacing, Some(100));
        assert_eq!(config.table.spacers, TableConfig::default().spacers);
    }

    #[test]
    fn test_load_json_config() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"{{"rules": {{"disabled": ["spacing"]}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.is_rule_enabled("spacing"));
    }

    #[test]
    fn test_unknown_extension() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_rule_id_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "rules:\n  disabled: [hungarian]").unwrap();
        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_find_in_directory() {
        let dir = TempDir::new().unwrap();
        assert!(Config::find_in(dir.path()).is_none());

        std::fs::write(dir.path().join("aselint.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".aselintrc.yml"), "{}").unwrap();
        assert_eq!(
            Config::find_in(dir.path()),
            Some(dir.path().join(".aselintrc.yml"))
        );
    }

    #[test]
    fn test_merge_cli() {
        let mut config = Config::default();
        config.merge_cli(
            Some(OutputFormat::Json),
            Some(true),
            Some(8),
            Some(vec!["brackets".to_string()]),
            Some(10),
        );

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert_eq!(config.engine.jobs, 8);
        assert!(!config.is_rule_enabled("bracket-match"));
        assert_eq!(config.table.thresholds.spacing, Some(10));
    }

    #[test]
    fn test_invalid_table_is_reported() {
        let mut config = Config::default();
        config.table.notation_pattern = "(".to_string();
        assert!(matches!(
            config.rule_table(),
            Err(LintError::InvalidPattern { .. })
        ));
    }
}
