// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Domain records shared by the registries, the store and the sync engine.
//!
//! ```text
//! Instance { name, game_version, loader, loader_version, install_path }
//!    |
//!    +-- packages: [ModData]      one per project_id
//!                     |
//!                     +-- dependencies: [DependencyRef]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, StoreError};

/// Registry a package was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    CurseForge,
    Modrinth,
}

impl Platform {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurseForge => "curseforge",
            Self::Modrinth => "modrinth",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mod loader an instance targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    #[default]
    Fabric,
    Quilt,
}

impl Loader {
    /// Loader tag as used by the registries.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fabric => "fabric",
            Self::Quilt => "quilt",
        }
    }

    /// JVM argument pointing the loader at an extra mods directory.
    #[must_use]
    pub const fn mods_dir_arg(&self) -> &'static str {
        match self {
            Self::Fabric => "-Dfabric.addMods=",
            Self::Quilt => "-Dloader.modsDir=",
        }
    }

    /// Manifest files accepted inside a mod archive, in lookup order.
    ///
    /// Quilt loads Fabric mods as well.
    #[must_use]
    pub const fn manifest_files(&self) -> &'static [&'static str] {
        match self {
            Self::Fabric => &["fabric.mod.json"],
            Self::Quilt => &["quilt.mod.json", "fabric.mod.json"],
        }
    }

    /// Launcher version id, e.g. `fabric-loader-0.15.7-1.20.1`.
    #[must_use]
    pub fn profile_id(&self, loader_version: &str, game_version: &str) -> String {
        format!("{}-loader-{loader_version}-{game_version}", self.as_str())
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Loader {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fabric" => Ok(Self::Fabric),
            "quilt" => Ok(Self::Quilt),
            _ => Err(ConfigError::InvalidValue {
                section: "loaders".to_string(),
                key: "default".to_string(),
                message: format!("expected 'fabric' or 'quilt', got '{s}'"),
            }),
        }
    }
}

/// A dependency declared by a resolved file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub required: bool,
}

/// Normalized record of one resolved, installable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModData {
    pub platform: Platform,
    pub project_slug: String,
    /// Identifies the package within an instance.
    pub project_id: String,
    /// Identifies the artifact within its platform.
    pub file_id: String,
    pub name: String,
    /// Version string read from the artifact's manifest after download.
    #[serde(default)]
    pub resolved_version: String,
    pub download_url: String,
    pub filename: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
    /// Installed by a cascade rather than requested directly.
    #[serde(default)]
    pub is_dependency: bool,
}

impl ModData {
    /// Dependencies that must be installed alongside this package.
    pub fn required_dependencies(&self) -> impl Iterator<Item = &DependencyRef> {
        self.dependencies.iter().filter(|d| d.required)
    }

    /// Whether this package declares `project_id` as a required dependency.
    #[must_use]
    pub fn requires(&self, project_id: &str) -> bool {
        self.required_dependencies()
            .any(|d| d.project_id == project_id)
    }

    /// Case-insensitive match on display name, slug or project id.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query)
            || self.project_slug.eq_ignore_ascii_case(query)
            || self.project_id == query
    }
}

/// A named, versioned directory with its own package set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub name: String,
    pub game_version: String,
    #[serde(default)]
    pub loader: Loader,
    #[serde(default)]
    pub loader_version: String,
    #[serde(default)]
    pub install_path: PathBuf,
    #[serde(default)]
    pub packages: Vec<ModData>,
}

impl Instance {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        game_version: impl Into<String>,
        loader: Loader,
        install_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            game_version: game_version.into(),
            loader,
            loader_version: String::new(),
            install_path: install_path.into(),
            packages: Vec::new(),
        }
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[must_use]
    pub fn find_package(&self, project_id: &str) -> Option<&ModData> {
        self.packages.iter().find(|p| p.project_id == project_id)
    }

    #[must_use]
    pub fn has_package(&self, project_id: &str) -> bool {
        self.find_package(project_id).is_some()
    }

    /// Finds a package by name, slug or project id.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Option<&ModData> {
        self.packages.iter().find(|p| p.matches(query))
    }

    /// Packages that declare `project_id` as a required dependency.
    #[must_use]
    pub fn dependents_of(&self, project_id: &str) -> Vec<&ModData> {
        self.packages
            .iter()
            .filter(|p| p.project_id != project_id && p.requires(project_id))
            .collect()
    }

    /// Packages installed on request, not by a cascade.
    pub fn top_level_packages(&self) -> impl Iterator<Item = &ModData> {
        self.packages.iter().filter(|p| !p.is_dependency)
    }

    /// Appends a record, keeping project ids unique.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyInstalled` if the project is present.
    pub fn push_package(&mut self, record: ModData) -> Result<(), StoreError> {
        if let Some(existing) = self.find_package(&record.project_id) {
            return Err(StoreError::AlreadyInstalled {
                project_id: record.project_id,
                name: existing.name.clone(),
            });
        }
        self.packages.push(record);
        Ok(())
    }

    /// Removes and returns the record for `project_id`.
    pub fn take_package(&mut self, project_id: &str) -> Option<ModData> {
        let idx = self
            .packages
            .iter()
            .position(|p| p.project_id == project_id)?;
        Some(self.packages.remove(idx))
    }

    /// Where the artifact of `record` lives on disk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnsafeFilename` unless the filename names a
    /// direct child of the install path.
    pub fn artifact_path(&self, record: &ModData) -> Result<PathBuf, StoreError> {
        if is_plain_file_name(&record.filename) {
            Ok(self.install_path.join(&record.filename))
        } else {
            Err(StoreError::UnsafeFilename {
                filename: record.filename.clone(),
            })
        }
    }

    /// Launcher version id of this instance's loader.
    #[must_use]
    pub fn profile_id(&self) -> String {
        self.loader
            .profile_id(&self.loader_version, &self.game_version)
    }
}

/// Whether `name` is a single path component naming a file.
#[must_use]
pub fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\']) && Path::new(name).file_name().is_some_and(|f| f == name)
}

#[cfg(test)]
mod tests;
