//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `--config <path>` on the command line
//! 2. `$AMATH_CONFIG` environment variable
//! 3. `<config dir>/amath/config.toml`
//! 4. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use amath::DEFAULT_MAX_TERMS;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sequence: SequenceConfig,
    pub output: OutputConfig,
}

/// Defaults and limits for sequence generation.
///
/// The parameter defaults are raw text, coerced exactly like values given on
/// the command line.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SequenceConfig {
    pub first_term: String,
    pub step: String,
    pub count: String,
    /// Reject invalid numbers instead of coercing them.
    pub strict: bool,
    /// Largest number of terms a single request may generate.
    pub max_terms: usize,
}

/// Output settings.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// --- Defaults ---

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            first_term: "1".into(),
            step: "1".into(),
            count: "5".into(),
            strict: false,
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

// --- Loading ---

/// Resolve the config file path, if any exists.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var("AMATH_CONFIG") {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", "amath")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration, falling back to defaults when no file is found.
/// An explicitly named file that cannot be read is an error.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match config_path(explicit) {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.sequence.first_term, "1");
        assert_eq!(config.sequence.step, "1");
        assert_eq!(config.sequence.count, "5");
        assert!(!config.sequence.strict);
        assert_eq!(config.sequence.max_terms, DEFAULT_MAX_TERMS);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file() {
        let config = parse(
            r#"
            [sequence]
            count = "8"
            strict = true

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.sequence.count, "8");
        assert_eq!(config.sequence.first_term, "1");
        assert!(config.sequence.strict);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(parse("[output]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sequence]\nmax_terms = 3").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.sequence.max_terms, 3);
    }

    #[test]
    fn missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }
}
