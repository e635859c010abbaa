//! Site configuration loaded from `site.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure (site.toml).
///
/// Every section is optional; a missing file yields all defaults, so a
/// bare directory of templates builds without any configuration at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub data: DataTables,
}

/// Template tree layout: pages live directly under `dir`, partials under
/// `components` (recursive), layouts under `layouts` (flat, by name).
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_templates_dir")]
    pub dir: String,

    /// Partials directory, relative to `dir`.
    #[serde(default = "default_components_dir")]
    pub components: String,

    /// Layouts directory, relative to `dir`.
    #[serde(default = "default_layouts_dir")]
    pub layouts: String,

    /// Layout used when a page names none.
    #[serde(default = "default_layout")]
    pub default_layout: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
            components: default_components_dir(),
            layouts: default_layouts_dir(),
            default_layout: default_layout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettings {
    /// Where page HTML is written. The site root by default, so built
    /// pages sit next to their assets during development.
    #[serde(default = "default_output")]
    pub output: String,

    /// Staging directory for the production copy.
    #[serde(default = "default_dist")]
    pub dist: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            dist: default_dist(),
        }
    }
}

/// Static asset staging: folders copied verbatim into dist, subdirectory
/// names skipped during the copy, and source-to-built reference rewrites
/// applied to HTML on the way through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub rewrites: Vec<Rewrite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

/// Free-form template data, one table per component, merged flat for
/// rendering (layout, then header, then footer, then menu).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataTables {
    #[serde(default)]
    pub layout: toml::Table,
    #[serde(default)]
    pub header: toml::Table,
    #[serde(default)]
    pub footer: toml::Table,
    #[serde(default)]
    pub menu: toml::Table,
}

fn default_templates_dir() -> String {
    "templates".to_string()
}
fn default_components_dir() -> String {
    "shared/components".to_string()
}
fn default_layouts_dir() -> String {
    "shared/layouts".to_string()
}
fn default_layout() -> String {
    "master".to_string()
}
fn default_output() -> String {
    ".".to_string()
}
fn default_dist() -> String {
    "dist".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SiteConfig {
    /// Load configuration from `path` if it exists, defaults otherwise.
    /// A config file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();

        let config = SiteConfig::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config.templates.dir, "templates");
        assert_eq!(config.templates.default_layout, "master");
        assert_eq!(config.build.output, ".");
        assert!(config.assets.folders.is_empty());
        assert!(config.data.layout.is_empty());
    }

    #[test]
    fn parses_all_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[templates]
dir = "m/_templates"

[build]
output = "out"

[assets]
folders = ["m/f", "m/i"]
exclude = ["_svg"]
rewrites = [{ from = "/m/_scss/site.min.scss", to = "/m/css/site.min.css" }]

[data.layout]
siteName = "My Website"

[data.menu]
menuItems = [{ label = "Home", url = "/", active = true }]
"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config.templates.dir, "m/_templates");
        // Unset keys still default.
        assert_eq!(config.templates.layouts, "shared/layouts");
        assert_eq!(config.build.output, "out");
        assert_eq!(config.build.dist, "dist");
        assert_eq!(config.assets.folders, vec!["m/f", "m/i"]);
        assert_eq!(config.assets.rewrites.len(), 1);
        assert_eq!(config.assets.rewrites[0].to, "/m/css/site.min.css");
        assert!(config.data.layout.contains_key("siteName"));
        assert!(config.data.menu.contains_key("menuItems"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[templates\ndir = ").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
