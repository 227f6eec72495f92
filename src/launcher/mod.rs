// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entries in the launcher's `launcher_profiles.json`.
//!
//! The document belongs to the launcher. Only `profiles.<instance>` is
//! touched; every other key is carried through unchanged.

#[cfg(test)]
mod tests;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::types::ProfileConfig;
use crate::error::{ModmanResult, StoreError};
use crate::model::Instance;
use crate::utility::fs::{read_json_optional, write_json_atomic};

/// One launcher profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub last_version_id: String,
    pub created: String,
    pub last_used: String,
    pub java_args: String,
}

impl LauncherProfile {
    /// Profile launching `instance` with its mods directory added.
    #[must_use]
    pub fn for_instance(instance: &Instance, settings: &ProfileConfig, now: DateTime<Utc>) -> Self {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let java_args = format!(
            "{} {}{}",
            settings.java_args.trim(),
            instance.loader.mods_dir_arg(),
            instance.install_path.display()
        );
        Self {
            name: instance.name.clone(),
            kind: "custom".to_string(),
            icon: settings.icon.clone(),
            last_version_id: instance.profile_id(),
            created: stamp.clone(),
            last_used: stamp,
            java_args: java_args.trim_start().to_string(),
        }
    }
}

/// Handle on the launcher profile document.
#[derive(Debug, Clone)]
pub struct LauncherProfiles {
    path: PathBuf,
}

impl LauncherProfiles {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ModmanResult<Map<String, Value>> {
        match read_json_optional::<Value>(&self.path)? {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(StoreError::CorruptState {
                path: self.path.display().to_string(),
                message: "expected a JSON object".to_string(),
            }
            .into()),
            None => Ok(Map::new()),
        }
    }

    fn take_profiles(doc: &mut Map<String, Value>) -> Map<String, Value> {
        match doc.remove("profiles") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Inserts or replaces the profile keyed by its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or written.
    pub fn add(&self, profile: &LauncherProfile) -> ModmanResult<()> {
        let mut doc = self.load()?;
        let value = serde_json::to_value(profile).map_err(|e| StoreError::CorruptState {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut profiles = Self::take_profiles(&mut doc);
        profiles.insert(profile.name.clone(), value);
        doc.insert("profiles".to_string(), Value::Object(profiles));
        write_json_atomic(&self.path, &doc)?;
        debug!(profile = %profile.name, "launcher profile written");
        Ok(())
    }

    /// Deletes the profile named `name`; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or written.
    pub fn remove(&self, name: &str) -> ModmanResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let mut doc = self.load()?;
        let mut profiles = Self::take_profiles(&mut doc);
        let removed = profiles.remove(name).is_some();
        doc.insert("profiles".to_string(), Value::Object(profiles));
        if removed {
            write_json_atomic(&self.path, &doc)?;
            debug!(profile = name, "launcher profile removed");
        }
        Ok(removed)
    }

    /// Points an existing profile at a new version id.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or written.
    pub fn set_version(&self, name: &str, version_id: &str) -> ModmanResult<bool> {
        let mut doc = self.load()?;
        let mut profiles = Self::take_profiles(&mut doc);
        let Some(Value::Object(profile)) = profiles.get_mut(name) else {
            return Ok(false);
        };
        profile.insert(
            "lastVersionId".to_string(),
            Value::String(version_id.to_string()),
        );
        doc.insert("profiles".to_string(), Value::Object(profiles));
        write_json_atomic(&self.path, &doc)?;
        Ok(true)
    }

    /// Reads back one profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub fn get(&self, name: &str) -> ModmanResult<Option<LauncherProfile>> {
        let mut doc = self.load()?;
        Ok(Self::take_profiles(&mut doc)
            .remove(name)
            .and_then(|v| serde_json::from_value(v).ok()))
    }
}
