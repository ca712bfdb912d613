use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        catalog::{InMemoryCatalog, load_addon_data_catalog, load_json_catalog},
        export::TEMPLATES_FILE_NAME,
        extract::SourceTree,
        file_scanner::scan_files,
    },
    error::AuditError,
    utils::display_relative,
};

/// Everything one validation run needs to know about the add-on under audit.
///
/// Built once per invocation and shared read-only by both validators.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g. `--addons-root`)
/// 2. `.addonauditrc.json` config file
/// 3. Built-in defaults
pub struct AuditContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root: relative config paths resolve against it and reported
    /// file paths are shown relative to it.
    pub root_dir: PathBuf,

    pub addon_id: String,

    /// `<addOnsRoot>/<addon_id>`, guaranteed to exist.
    pub addon_dir: PathBuf,

    /// Every regular file under `addon_dir`, sorted.
    pub files: Vec<PathBuf>,
}

impl AuditContext {
    /// Create a new `AuditContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - The add-on directory does not exist
    pub fn new(addon_id: &str, common_args: &CommonArgs) -> Result<Self> {
        let start_dir = match &common_args.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        let config_result = load_config(&start_dir)?;
        if !config_result.from_file {
            tracing::debug!("No config file found, using default configuration");
        }

        let mut config = config_result.config;

        if let Some(ref addons_root) = common_args.addons_root {
            config.add_ons_root = addons_root.to_string_lossy().to_string();
        }
        if let Some(ref catalog) = common_args.catalog {
            config.catalog_path = Some(catalog.to_string_lossy().to_string());
        }

        Ok(Self::from_config(addon_id, config, config_result.base_dir)?)
    }

    /// Resolve the add-on directory and scan it.
    pub fn from_config(
        addon_id: &str,
        config: Config,
        root_dir: PathBuf,
    ) -> Result<Self, AuditError> {
        let addon_dir = root_dir.join(&config.add_ons_root).join(addon_id);
        if !addon_dir.is_dir() {
            return Err(AuditError::AddOnNotFound {
                addon_id: addon_id.to_string(),
                path: addon_dir,
            });
        }

        let scan = scan_files(&addon_dir, &config.ignores);
        if scan.skipped_count > 0 {
            tracing::warn!(
                "{} path(s) skipped due to access errors",
                scan.skipped_count
            );
        }
        tracing::debug!(
            addon_id,
            dir = %addon_dir.display(),
            files = scan.files.len(),
            "scanned add-on"
        );

        Ok(Self {
            config,
            root_dir,
            addon_id: addon_id.to_string(),
            addon_dir,
            files: scan.files,
        })
    }

    pub fn addons_root(&self) -> PathBuf {
        self.root_dir.join(&self.config.add_ons_root)
    }

    pub fn source_tree(&self) -> SourceTree<'_> {
        SourceTree {
            addon_dir: &self.addon_dir,
            files: &self.files,
            data_dir: &self.config.data_dir,
        }
    }

    pub fn template_export_path(&self) -> PathBuf {
        self.addon_dir
            .join(&self.config.data_dir)
            .join(TEMPLATES_FILE_NAME)
    }

    /// Open the configured catalog store.
    pub fn open_catalog(&self) -> Result<InMemoryCatalog, AuditError> {
        match &self.config.catalog_path {
            Some(path) => load_json_catalog(&self.root_dir.join(path)),
            None => load_addon_data_catalog(&self.addons_root(), &self.config.data_dir),
        }
    }

    /// Path as shown in reports.
    pub fn display_path(&self, path: &Path) -> String {
        display_relative(path, &self.root_dir)
    }
}
