// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted application state.
//!
//! ```text
//! StateFile::lock() --> StateLock (exclusive, held per command)
//! StateFile::load() --> AppState --> mutate in memory --> StateFile::save()
//!                                                          temp file + rename
//! ```
//!
//! The whole document is read at command start and written once at the end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info};

use crate::config::paths::Layout;
use crate::error::{FsError, ModmanResult, StoreError};
use crate::model::Instance;
use crate::utility::fs::write_json_atomic;

/// Process-wide record of everything modman manages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub work_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer_version: Option<String>,
    /// Loader profile ids already written to the launcher's versions dir.
    pub installed_loader_versions: BTreeSet<String>,
    pub instances: Vec<Instance>,
}

impl AppState {
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    /// Case-insensitive instance lookup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceNotFound` if no instance has that name.
    pub fn find_instance(&self, name: &str) -> ModmanResult<&Instance> {
        self.instances
            .iter()
            .find(|i| i.is_named(name))
            .ok_or_else(|| not_found(name))
    }

    /// Mutable case-insensitive instance lookup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceNotFound` if no instance has that name.
    pub fn find_instance_mut(&mut self, name: &str) -> ModmanResult<&mut Instance> {
        self.instances
            .iter_mut()
            .find(|i| i.is_named(name))
            .ok_or_else(|| not_found(name))
    }

    #[must_use]
    pub fn contains_instance(&self, name: &str) -> bool {
        self.instances.iter().any(|i| i.is_named(name))
    }

    /// Appends an instance, keeping names unique.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateInstance` if the name is taken.
    pub fn insert_instance(&mut self, instance: Instance) -> ModmanResult<()> {
        if self.contains_instance(&instance.name) {
            return Err(StoreError::DuplicateInstance {
                name: instance.name,
            }
            .into());
        }
        self.instances.push(instance);
        Ok(())
    }

    /// Replaces the stored instance with the same name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceNotFound` if it no longer exists.
    pub fn replace_instance(&mut self, instance: Instance) -> ModmanResult<()> {
        let slot = self.find_instance_mut(&instance.name)?;
        *slot = instance;
        Ok(())
    }

    /// Removes an instance record, clearing the active pointer if it named it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceNotFound` if no instance has that name.
    pub fn remove_instance(&mut self, name: &str) -> ModmanResult<Instance> {
        let idx = self
            .instances
            .iter()
            .position(|i| i.is_named(name))
            .ok_or_else(|| not_found(name))?;
        let removed = self.instances.remove(idx);
        if self
            .active_instance
            .as_deref()
            .is_some_and(|active| removed.is_named(active))
        {
            self.active_instance = None;
        }
        Ok(removed)
    }

    /// Marks an existing instance active, storing its canonical name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InstanceNotFound` if no instance has that name.
    pub fn set_active(&mut self, name: &str) -> ModmanResult<()> {
        let canonical = self.find_instance(name)?.name.clone();
        self.active_instance = Some(canonical);
        Ok(())
    }

    /// Name of the active instance.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoActiveInstance` when none is set.
    pub fn active_name(&self) -> ModmanResult<&str> {
        self.active_instance
            .as_deref()
            .ok_or_else(|| StoreError::NoActiveInstance.into())
    }

    /// The active instance.
    ///
    /// # Errors
    ///
    /// Returns an error if none is set or it no longer exists.
    pub fn active(&self) -> ModmanResult<&Instance> {
        self.find_instance(self.active_name()?)
    }
}

fn not_found(name: &str) -> crate::error::ModmanError {
    StoreError::InstanceNotFound {
        name: name.to_string(),
    }
    .into()
}

/// Exclusive lock on the state, released on drop.
pub struct StateLock {
    file: File,
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// On-disk location of the state document.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    lock_path: PathBuf,
    work_dir: PathBuf,
}

impl StateFile {
    #[must_use]
    pub fn new(layout: &Layout) -> Self {
        Self {
            path: layout.state_file(),
            lock_path: layout.lock_file(),
            work_dir: layout.work_dir().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Creates the work directory and an empty state if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the state cannot
    /// be written or read back.
    pub fn init(&self, layout: &Layout) -> ModmanResult<AppState> {
        for dir in [layout.work_dir().to_path_buf(), layout.installers_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| FsError::io(&dir, e))?;
        }
        if self.exists() {
            return self.load();
        }
        let state = AppState::new(&self.work_dir);
        self.save(&state)?;
        info!(path = %self.path.display(), "created state file");
        Ok(state)
    }

    /// Takes the exclusive state lock, waiting for other modman processes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotInitialized` if the work directory does not
    /// exist, or an I/O error if locking fails.
    pub fn lock(&self) -> ModmanResult<StateLock> {
        if !self.work_dir.is_dir() {
            return Err(self.not_initialized());
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| FsError::io(&self.lock_path, e))?;
        if file.try_lock_exclusive().is_err() {
            info!("waiting for another modman process to finish");
            file.lock_exclusive()
                .map_err(|e| FsError::io(&self.lock_path, e))?;
        }
        debug!(path = %self.lock_path.display(), "state locked");
        Ok(StateLock { file })
    }

    /// Reads the whole state document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotInitialized` if the file is missing and
    /// `StoreError::CorruptState` if it cannot be decoded.
    pub fn load(&self) -> ModmanResult<AppState> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.not_initialized());
            }
            Err(e) => return Err(FsError::io(&self.path, e).into()),
        };
        let mut state: AppState =
            serde_json::from_slice(&data).map_err(|e| StoreError::CorruptState {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        state.work_dir.clone_from(&self.work_dir);
        debug!(
            path = %self.path.display(),
            instances = state.instances.len(),
            "state loaded"
        );
        Ok(state)
    }

    /// Writes the whole state document atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be written or renamed.
    pub fn save(&self, state: &AppState) -> ModmanResult<()> {
        write_json_atomic(&self.path, state)?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    fn not_initialized(&self) -> crate::error::ModmanError {
        StoreError::NotInitialized {
            path: self.work_dir.display().to_string(),
        }
        .into()
    }
}
