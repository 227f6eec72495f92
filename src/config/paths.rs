// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! minecraft/                    (.minecraft)
//!   launcher_profiles.json
//!   versions/<id>/<id>.json     (loader profiles)
//!   modman/                     (work_dir)
//!     modman.json               (state)
//!     modman.lock
//!     installers/
//!     instances/<name>/         (mods of one instance)
//!     exports/
//! ```
//!
//! `work_dir` is resolved from `minecraft` if not set.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Filesystem layout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// The `.minecraft` directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minecraft: Option<PathBuf>,
    /// modman's own directory (default: minecraft/modman).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

/// Platform default location of `.minecraft`.
#[must_use]
pub fn default_minecraft_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::data_dir().map(|d| d.join(".minecraft"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir().map(|d| d.join("minecraft"))
    } else {
        dirs::home_dir().map(|d| d.join(".minecraft"))
    }
}

impl PathsConfig {
    /// Fill in defaults and make `work_dir` absolute against `minecraft`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if no `minecraft` directory is set
    /// and none can be derived for this platform.
    pub fn resolve(&mut self) -> Result<()> {
        if self.minecraft.is_none() {
            self.minecraft = default_minecraft_dir();
        }
        let minecraft = self.minecraft.clone().ok_or_else(|| ConfigError::MissingKey {
            section: "paths".to_string(),
            key: "minecraft".to_string(),
        })?;

        match &self.work_dir {
            Some(p) if p.is_relative() => self.work_dir = Some(minecraft.join(p)),
            None => self.work_dir = Some(minecraft.join("modman")),
            _ => {}
        }
        Ok(())
    }

    /// The `.minecraft` directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not set.
    pub fn minecraft(&self) -> Result<&Path> {
        self.minecraft.as_deref().ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "minecraft".to_string(),
            }
            .into()
        })
    }

    /// modman's working directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::MissingKey` if the path is not resolved.
    pub fn work_dir(&self) -> Result<&Path> {
        self.work_dir.as_deref().ok_or_else(|| {
            ConfigError::MissingKey {
                section: "paths".to_string(),
                key: "work_dir".to_string(),
            }
            .into()
        })
    }
}

/// Concrete paths derived from a resolved [`PathsConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    minecraft: PathBuf,
    work_dir: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(minecraft: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            minecraft: minecraft.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Builds a layout from resolved paths.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is unresolved.
    pub fn from_config(paths: &PathsConfig) -> Result<Self> {
        Ok(Self::new(paths.minecraft()?, paths.work_dir()?))
    }

    #[must_use]
    pub fn minecraft(&self) -> &Path {
        &self.minecraft
    }

    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.work_dir.join("modman.json")
    }

    #[must_use]
    pub fn lock_file(&self) -> PathBuf {
        self.work_dir.join("modman.lock")
    }

    #[must_use]
    pub fn installers_dir(&self) -> PathBuf {
        self.work_dir.join("installers")
    }

    #[must_use]
    pub fn instances_dir(&self) -> PathBuf {
        self.work_dir.join("instances")
    }

    /// Directory holding the mods of one instance.
    #[must_use]
    pub fn instance_dir(&self, name: &str) -> PathBuf {
        self.instances_dir().join(name)
    }

    #[must_use]
    pub fn exports_dir(&self) -> PathBuf {
        self.work_dir.join("exports")
    }

    /// Launcher version JSON for a loader profile id.
    #[must_use]
    pub fn loader_profile(&self, profile_id: &str) -> PathBuf {
        self.minecraft
            .join("versions")
            .join(profile_id)
            .join(format!("{profile_id}.json"))
    }

    #[must_use]
    pub fn launcher_profiles(&self) -> PathBuf {
        self.minecraft.join("launcher_profiles.json")
    }
}
