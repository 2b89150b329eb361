use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".intllintrc.json";

/// Files that never ship user-facing text: tests, specs, mocks and fixtures.
pub const EXCLUDED_FILE_PATTERNS: &[&str] = &[
    "**/*.test.*",
    "**/*.spec.*",
    "**/*.mock.*",
    "**/*_test.*",
    "**/__tests__/**",
    "**/__mocks__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_checked_attributes")]
    pub checked_attributes: Vec<String>,
    #[serde(default = "default_checked_calls")]
    pub checked_calls: Vec<String>,
    #[serde(default = "default_translation_functions")]
    pub translation_functions: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_checked_attributes() -> Vec<String> {
    [
        "placeholder",
        "title",
        "alt",
        "label",
        "aria-label",
        "aria-placeholder",
        "aria-description",
        "aria-valuetext",
    ]
    .map(String::from)
    .to_vec()
}

fn default_checked_calls() -> Vec<String> {
    ["toast.error", "toast.success", "toast.warning", "toast.info"]
        .map(String::from)
        .to_vec()
}

fn default_translation_functions() -> Vec<String> {
    ["t", "i18n.t"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            ignores: Vec::new(),
            checked_attributes: default_checked_attributes(),
            checked_calls: default_checked_calls(),
            translation_functions: default_translation_functions(),
            ignore_texts: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.source_root.trim().is_empty() {
            anyhow::bail!("'sourceRoot' must not be empty");
        }

        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
