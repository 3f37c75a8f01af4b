// File: src/config.rs
// Purpose: Configuration parsing from pagenav.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub title: TitleConfig,
}

/// Where pages live and how they are found
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Directory containing the page tree (default: "app")
    #[serde(default = "default_app_dir")]
    pub app_dir: String,

    /// File name that marks a directory as a page (default: "page.py")
    #[serde(default = "default_page_file")]
    pub page_file: String,

    /// Glob patterns, relative to `app_dir`, that are never scanned
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether symbolic links are followed while walking
    #[serde(default = "default_false")]
    pub follow_links: bool,
}

/// How the navigation title is read out of a page's source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleConfig {
    /// Name the UI framework is imported under (default: "st")
    #[serde(default = "default_alias")]
    pub alias: String,

    /// Method whose first argument is the title (default: "title")
    #[serde(default = "default_title_method")]
    pub title_method: String,

    /// Title used when no literal title call is found (default: "Page")
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Only trust the alias when the page imports this module under it
    #[serde(default)]
    pub require_import: Option<String>,
}

// Default values
fn default_app_dir() -> String {
    "app".to_string()
}

fn default_page_file() -> String {
    "page.py".to_string()
}

fn default_alias() -> String {
    "st".to_string()
}

fn default_title_method() -> String {
    "title".to_string()
}

fn default_fallback_title() -> String {
    "Page".to_string()
}

fn default_false() -> bool {
    false
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_dir: default_app_dir(),
            page_file: default_page_file(),
            exclude: Vec::new(),
            follow_links: false,
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            alias: default_alias(),
            title_method: default_title_method(),
            fallback_title: default_fallback_title(),
            require_import: None,
        }
    }
}

impl Config {
    /// Load configuration from a pagenav.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.app_dir, "app");
        assert_eq!(config.routing.page_file, "page.py");
        assert!(config.routing.exclude.is_empty());
        assert!(!config.routing.follow_links);
        assert_eq!(config.title.alias, "st");
        assert_eq!(config.title.title_method, "title");
        assert_eq!(config.title.fallback_title, "Page");
        assert_eq!(config.title.require_import, None);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [routing]
            app_dir = "src/pages"
            exclude = ["drafts/**"]

            [title]
            fallback_title = "Untitled"
            require_import = "streamlit"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.app_dir, "src/pages");
        assert_eq!(config.routing.page_file, "page.py");
        assert_eq!(config.routing.exclude, vec!["drafts/**"]);
        assert_eq!(config.title.alias, "st");
        assert_eq!(config.title.fallback_title, "Untitled");
        assert_eq!(config.title.require_import.as_deref(), Some("streamlit"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("pagenav.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagenav.toml");
        fs::write(&path, "[routing\napp_dir = 1").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
