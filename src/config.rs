use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = ".addonauditrc.json";

/// Phrase prefixes consumed by framework reflection (permissions, options,
/// navigation, ...) rather than referenced from source.
pub const DEFAULT_UNUSED_PREFIXES: &[&str] = &[
    "permission.",
    "permission_interface.",
    "nav.",
    "option.",
    "option_explain.",
    "widget_def.",
    "widget_def_desc.",
    "admin_navigation.",
    "option_group.",
    "option_group_description.",
    "cron_entry.",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_addons_root", alias = "addonsRoot")]
    pub add_ons_root: String,
    /// JSON catalog dump. When unset the catalog is built from every
    /// add-on's `_data` export.
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_platform_addon_id")]
    pub platform_add_on_id: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_templates_output_dir")]
    pub templates_output_dir: String,
    #[serde(default = "default_template_extension")]
    pub template_extension: String,
    #[serde(default = "default_unused_prefixes")]
    pub unused_prefixes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_addons_root() -> String {
    "src/addons".to_string()
}

fn default_platform_addon_id() -> String {
    "XF".to_string()
}

fn default_data_dir() -> String {
    "_data".to_string()
}

fn default_templates_output_dir() -> String {
    "_output/templates".to_string()
}

fn default_template_extension() -> String {
    "html".to_string()
}

fn default_unused_prefixes() -> Vec<String> {
    DEFAULT_UNUSED_PREFIXES.iter().map(|p| p.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            add_ons_root: default_addons_root(),
            catalog_path: None,
            platform_add_on_id: default_platform_addon_id(),
            data_dir: default_data_dir(),
            templates_output_dir: default_templates_output_dir(),
            template_extension: default_template_extension(),
            unused_prefixes: default_unused_prefixes(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// directory name is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.data_dir.is_empty() {
            anyhow::bail!("'dataDir' must not be empty");
        }
        if self.templates_output_dir.is_empty() {
            anyhow::bail!("'templatesOutputDir' must not be empty");
        }

        Ok(())
    }

    /// Whether `title` is exempt from unused-phrase detection.
    pub fn is_reflected_phrase(&self, title: &str) -> bool {
        self.unused_prefixes
            .iter()
            .any(|prefix| title.starts_with(prefix.as_str()))
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
    /// Directory relative paths in the config resolve against: the config
    /// file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config file");
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
