//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (clinsight.toml)
//! 3. Environment variables (CLINSIGHT_* prefix, `__` nesting separator)
//!
//! The inference API key additionally falls back to the conventional
//! `GEMINI_API_KEY` variable, so deployments that only export the key
//! still get the generative paths.

use std::env;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use tracing::debug;

use super::types::Config;
use crate::types::{ClinError, Result};

/// Environment variable consulted when no api_key is configured
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults, project file, env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. CLINSIGHT_INFERENCE__API_KEY -> inference.api_key
        figment = figment.merge(Env::prefixed("CLINSIGHT_").split("__").lowercase(true));

        let mut config: Config = figment
            .extract()
            .map_err(|e| ClinError::Config(format!("Configuration error: {e}")))?;

        Self::apply_key_fallback(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ClinError::Config(format!("Configuration error: {e}")))?;

        Self::apply_key_fallback(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Get path to the project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("clinsight.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show the current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| ClinError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    /// Write the default configuration to the project config file
    pub fn init_config(force: bool) -> Result<()> {
        let path = Self::project_config_path();
        if path.exists() && !force {
            return Err(ClinError::Config(format!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        Self::write_default(&path)?;
        println!("Config written: {}", path.display());
        Ok(())
    }

    /// Render the built-in defaults as TOML and write them to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        let rendered = toml::to_string_pretty(&Config::default())
            .map_err(|e| ClinError::Config(e.to_string()))?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    fn apply_key_fallback(config: &mut Config) {
        if config.inference.api_key.as_deref().is_none_or(str::is_empty)
            && let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            config.inference.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("tempfile");
        writeln!(
            file,
            r#"
[inference]
provider = "ollama"
model = "llama3:latest"

[analysis]
models = ["gemini-2.5-flash-preview-09-2025"]
"#
        )
        .expect("write");

        let config = ConfigLoader::load_from_file(file.path()).expect("load");
        assert_eq!(config.inference.provider, "ollama");
        assert_eq!(config.inference.model, "llama3:latest");
        // untouched section keeps defaults
        assert_eq!(config.analysis.max_attempts_per_model, 3);
        assert_eq!(config.analysis.models.len(), 1);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").expect("tempfile");
        writeln!(
            file,
            r#"
[inference]
timeout_secs = 0
"#
        )
        .expect("write");

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config =
            ConfigLoader::load_from_file(Path::new("/nonexistent/clinsight.toml")).expect("load");
        assert_eq!(config.inference.provider, "gemini");
    }

    #[test]
    fn test_write_default_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clinsight.toml");

        ConfigLoader::write_default(&path).expect("write");
        let config = ConfigLoader::load_from_file(&path).expect("load");

        assert_eq!(config.inference.provider, "gemini");
        assert_eq!(config.analysis.max_attempts_per_model, 3);
    }
}
