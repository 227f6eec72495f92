// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for modman-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. user modman.toml (<config dir>/modman/modman.toml)
//! 3. local modman.toml (cwd)
//! 4. --config
//! 5. MODMAN_* env vars
//! 6. CLI overrides (--minecraft, --set)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MODMAN_PATHS__MINECRAFT=/games/mc          → paths.minecraft
//! MODMAN_REGISTRIES__CURSEFORGE_KEY=secret   → registries.curseforge_key
//! MODMAN_LOADERS__DEFAULT=quilt              → loaders.default
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, LoadersConfig, ProfileConfig, RegistriesConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// Package registries.
    pub registries: RegistriesConfig,
    /// Loader metadata endpoints.
    pub loaders: LoadersConfig,
    /// Launcher profile defaults.
    pub profile: ProfileConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modman_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("modman.toml")
    ///     .with_env_prefix("MODMAN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// User-level config file location.
    #[must_use]
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("modman").join("modman.toml"))
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.minecraft` directory cannot be determined or
    /// a registry URL is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;
        for (key, value) in [
            ("modrinth_url", &self.registries.modrinth_url),
            ("curseforge_url", &self.registries.curseforge_url),
        ] {
            if value.trim().is_empty() {
                return Err(crate::error::ConfigError::InvalidValue {
                    section: "registries".to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered; the CurseForge key is hidden.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file".to_string(), fmt(&self.global.log_file));

        options.insert("paths.minecraft".to_string(), fmt(&self.paths.minecraft));
        options.insert("paths.work_dir".to_string(), fmt(&self.paths.work_dir));

        options.insert(
            "registries.modrinth_url".to_string(),
            self.registries.modrinth_url.clone(),
        );
        options.insert(
            "registries.curseforge_url".to_string(),
            self.registries.curseforge_url.clone(),
        );
        if !self.registries.curseforge_key.is_empty() {
            options.insert("registries.curseforge_key".to_string(), "[hidden]".to_string());
        }
        options.insert(
            "registries.curseforge_game_id".to_string(),
            self.registries.curseforge_game_id.to_string(),
        );

        options.insert("loaders.default".to_string(), self.loaders.default.to_string());
        options.insert(
            "loaders.fabric_meta_url".to_string(),
            self.loaders.fabric_meta_url.clone(),
        );
        options.insert(
            "loaders.quilt_meta_url".to_string(),
            self.loaders.quilt_meta_url.clone(),
        );
        options.insert(
            "loaders.version_manifest_url".to_string(),
            self.loaders.version_manifest_url.clone(),
        );

        options.insert("profile.icon".to_string(), self.profile.icon.clone());
        options.insert("profile.java_args".to_string(), self.profile.java_args.clone());

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
