use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_report_filename")]
    pub report_filename: String,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default = "default_create_empty_dirs")]
    pub create_empty_dirs: bool,
}

fn default_report_filename() -> String {
    "REFACTORING_SUMMARY.md".to_string()
}

fn default_create_empty_dirs() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_filename: default_report_filename(),
            ignore_patterns: Vec::new(),
            create_empty_dirs: true,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(cli_patterns: Vec<String>) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".cleaver.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if !cli_patterns.is_empty() {
            config.ignore_patterns.extend(cli_patterns);
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.report_filename != default_report_filename() {
            self.report_filename = other.report_filename;
        }
        if !other.ignore_patterns.is_empty() {
            self.ignore_patterns = other.ignore_patterns;
        }
        self.create_empty_dirs = other.create_empty_dirs;
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cleaver").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report_filename, "REFACTORING_SUMMARY.md");
        assert!(config.create_empty_dirs);
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            report_filename: "SPLIT_REPORT.md".to_string(),
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.report_filename, "SPLIT_REPORT.md");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(r#"ignore_patterns = ["^Test"]"#).unwrap();
        assert_eq!(config.report_filename, "REFACTORING_SUMMARY.md");
        assert!(config.create_empty_dirs);
        assert_eq!(config.ignore_patterns, vec!["^Test".to_string()]);
    }
}
