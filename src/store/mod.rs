// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Instance store: instances on disk and the packages inside them.
//!
//! ```text
//! create(name, game, loader)
//!   duplicate name? --> DuplicateInstance
//!   latest loader --> profile json --> mods dir --> launcher profile --> state
//!
//! add_package(instance, record)
//!   project present? --> AlreadyInstalled
//!   download --> manifest (ManifestInvalid deletes the file) --> push record
//!
//! remove_package(instance, project_id)   absent id is a no-op
//! delete(name)   mods dir + launcher profile + record (+ active pointer)
//! ```
//!
//! Package changes happen on an `&mut Instance` the caller owns; it writes
//! the instance back with [`AppState::replace_instance`] and saves once.

#[cfg(test)]
mod tests;

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::context::Context;
use crate::error::{FsError, ModmanResult, StoreError};
use crate::launcher::LauncherProfile;
use crate::manifest;
use crate::model::{Instance, Loader, ModData};
use crate::net::Downloader;
use crate::state::AppState;
use crate::utility::fs::{
    read_json_optional, remove_dir_all_if_exists, remove_file_if_exists, write_json_atomic,
};

/// Creates an instance with the newest loader build and makes it known to
/// the launcher.
///
/// # Errors
///
/// Returns `StoreError::DuplicateInstance` if the name is taken, or any
/// network or filesystem error from provisioning.
#[instrument(skip(ctx, state))]
pub async fn create(
    ctx: &Context,
    state: &mut AppState,
    name: &str,
    game_version: &str,
    loader: Loader,
) -> ModmanResult<Instance> {
    if state.contains_instance(name) {
        return Err(StoreError::DuplicateInstance {
            name: name.to_string(),
        }
        .into());
    }

    let mut instance = Instance::new(
        name,
        game_version,
        loader,
        ctx.layout().instance_dir(name),
    );
    instance.loader_version = ctx.loaders().latest_version(loader).await?;
    ctx.loaders()
        .install_profile(
            state,
            ctx.layout(),
            loader,
            game_version,
            &instance.loader_version,
        )
        .await?;

    std::fs::create_dir_all(&instance.install_path)
        .map_err(|e| FsError::io(&instance.install_path, e))?;
    ctx.launcher().add(&LauncherProfile::for_instance(
        &instance,
        ctx.profile(),
        Utc::now(),
    ))?;

    state.insert_instance(instance.clone())?;
    info!(
        instance = %instance.name,
        profile = %instance.profile_id(),
        "instance created"
    );
    Ok(instance)
}

/// Removes an instance's mods directory, launcher profile and record.
///
/// # Errors
///
/// Returns `StoreError::InstanceNotFound` or a filesystem error.
#[instrument(skip(ctx, state))]
pub fn delete(ctx: &Context, state: &mut AppState, name: &str) -> ModmanResult<Instance> {
    let instance = state.find_instance(name)?;
    remove_dir_all_if_exists(&instance.install_path)?;
    ctx.launcher().remove(&instance.name)?;
    let removed = state.remove_instance(name)?;
    info!(instance = %removed.name, "instance deleted");
    Ok(removed)
}

/// Downloads and verifies `record`, then appends it to `instance`.
///
/// The manifest's version string replaces `resolved_version`.
///
/// # Errors
///
/// Returns `StoreError::AlreadyInstalled` before any download if the
/// project is present, a transport error if the download fails, or
/// `StoreError::ManifestInvalid` if the artifact is not a mod for the
/// instance's loader.
#[instrument(skip_all, fields(instance = %instance.name, package = %record.name))]
pub async fn add_package(
    instance: &mut Instance,
    mut record: ModData,
) -> ModmanResult<ModData> {
    if let Some(existing) = instance.find_package(&record.project_id) {
        return Err(StoreError::AlreadyInstalled {
            project_id: record.project_id,
            name: existing.name.clone(),
        }
        .into());
    }

    let path = instance.artifact_path(&record)?;
    Downloader::new()
        .url(record.download_url.as_str())
        .file(&path)
        .label(record.name.as_str())
        .download()
        .await?;

    match manifest::inspect(&path, instance.loader).await {
        Ok(found) => record.resolved_version = found.version,
        Err(e) => {
            remove_file_if_exists(&path)?;
            return Err(e);
        }
    }

    instance.push_package(record.clone())?;
    debug!(file = %path.display(), version = %record.resolved_version, "package added");
    Ok(record)
}

/// Evicts the package and deletes its artifact.
///
/// Returns `None` when the instance does not hold `project_id`.
///
/// # Errors
///
/// Returns a filesystem error if the artifact cannot be deleted.
pub fn remove_package(instance: &mut Instance, project_id: &str) -> ModmanResult<Option<ModData>> {
    let Some(record) = instance.find_package(project_id) else {
        debug!(project_id, "nothing to remove");
        return Ok(None);
    };
    remove_file_if_exists(&instance.artifact_path(record)?)?;
    Ok(instance.take_package(project_id))
}

/// Writes a portable copy of an instance to the exports directory.
///
/// # Errors
///
/// Returns `StoreError::InstanceNotFound` or a filesystem error.
pub fn export(ctx: &Context, state: &AppState, name: &str) -> ModmanResult<PathBuf> {
    let mut exported = state.find_instance(name)?.clone();
    exported.install_path = PathBuf::new();
    let path = ctx
        .layout()
        .exports_dir()
        .join(format!("{}.json", exported.name));
    write_json_atomic(&path, &exported)?;
    info!(instance = %exported.name, path = %path.display(), "instance exported");
    Ok(path)
}

/// Reads an exported instance.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file is missing, or an error if it
/// does not hold an instance.
pub fn read_export(path: &Path) -> ModmanResult<Instance> {
    read_json_optional(path)?
        .ok_or_else(|| FsError::NotFound(path.display().to_string()).into())
}
