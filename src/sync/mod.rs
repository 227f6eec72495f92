// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install, update and migrate orchestrations.
//!
//! ```text
//! install(instance, ref)
//!   registry resolve --> store::add_package --> Cascade::expand
//!
//! update(state, name)
//!   newer loader? --> profile json + launcher lastVersionId
//!   each package: re-resolve --> same file id? keep : swap artifact
//!
//! migrate(state, name, version)
//!   create <name>_<version> --> install every top-level package --> active
//! ```
//!
//! Callers own the `AppState` and persist it once after the call. A single
//! package failing is reported in the outcome and never aborts the batch.

pub mod resolver;

use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

use crate::context::Context;
use crate::error::{FsError, ModmanError, ModmanResult};
use crate::loader::is_newer;
use crate::model::{Instance, ModData};
use crate::registry::PackageRef;
use crate::state::AppState;
use crate::store;

pub use resolver::{Cascade, DependencyFailure};

/// Result of installing one package.
#[derive(Debug)]
pub struct InstallOutcome {
    pub record: ModData,
    /// Dependencies the cascade added, in install order.
    pub dependencies: Vec<ModData>,
    pub failures: Vec<DependencyFailure>,
}

/// A package that was skipped with the reason.
#[derive(Debug)]
pub struct PackageFailure {
    pub name: String,
    pub error: ModmanError,
}

/// Result of updating an instance.
#[derive(Debug, Default)]
pub struct UpdateOutcome {
    /// `(old, new)` loader version when the loader moved.
    pub loader: Option<(String, String)>,
    /// `(old, new)` records of swapped packages.
    pub updated: Vec<(ModData, ModData)>,
    pub unchanged: usize,
    pub failures: Vec<PackageFailure>,
}

/// Result of carrying packages into a new instance.
#[derive(Debug)]
pub struct CarryOutcome {
    pub instance: String,
    pub installed: Vec<InstallOutcome>,
    pub skipped: Vec<PackageFailure>,
}

/// Resolves `package` for `instance`, adds it and cascades its required
/// dependencies.
///
/// # Errors
///
/// Returns the resolution error (`NotFound`, `NoMatchingVersion`, transport),
/// `AlreadyInstalled`, or `ManifestInvalid` for the requested package.
/// Dependency failures are reported in the outcome instead.
#[instrument(skip(ctx, instance), fields(instance = %instance.name))]
pub async fn install(
    ctx: &Context,
    instance: &mut Instance,
    package: &PackageRef,
) -> ModmanResult<InstallOutcome> {
    let record = ctx
        .registries()
        .resolve(package, instance.loader, &instance.game_version)
        .await?;
    let record = store::add_package(instance, record).await?;
    info!(package = %record.name, version = %record.resolved_version, "installed");

    let mut cascade = Cascade::new(&record);
    cascade.expand(ctx, instance, &record).await;
    let (dependencies, failures) = cascade.finish();

    Ok(InstallOutcome {
        record,
        dependencies,
        failures,
    })
}

/// Moves `instance` to the newest loader build and newest package files.
///
/// Packages are swapped only when the resolved file id changes; dependency
/// cascades are not re-run.
///
/// # Errors
///
/// Returns an error if the instance is missing or the loader refresh fails.
#[instrument(skip(ctx, state))]
pub async fn update(ctx: &Context, state: &mut AppState, name: &str) -> ModmanResult<UpdateOutcome> {
    let mut instance = state.find_instance(name)?.clone();
    let mut outcome = UpdateOutcome::default();

    let latest = ctx.loaders().latest_version(instance.loader).await?;
    if is_newer(&instance.loader_version, &latest) {
        ctx.loaders()
            .install_profile(
                state,
                ctx.layout(),
                instance.loader,
                &instance.game_version,
                &latest,
            )
            .await?;
        let previous = std::mem::replace(&mut instance.loader_version, latest.clone());
        ctx.launcher()
            .set_version(&instance.name, &instance.profile_id())?;
        info!(from = %previous, to = %latest, "loader updated");
        outcome.loader = Some((previous, latest));
    }

    let ids: Vec<String> = instance
        .packages
        .iter()
        .map(|p| p.project_id.clone())
        .collect();
    for project_id in ids {
        let Some(current) = instance.find_package(&project_id).cloned() else {
            continue;
        };
        let fresh = ctx
            .registries()
            .resolve(
                &PackageRef::of_record(&current),
                instance.loader,
                &instance.game_version,
            )
            .await;

        match fresh {
            Ok(fresh) if fresh.file_id == current.file_id => {
                debug!(package = %current.name, "up to date");
                outcome.unchanged += 1;
            }
            Ok(mut fresh) => {
                fresh.is_dependency = current.is_dependency;
                match swap_package(&mut instance, current.clone(), fresh).await {
                    Ok(new) => {
                        info!(package = %new.name, from = %current.resolved_version, to = %new.resolved_version, "updated");
                        outcome.updated.push((current, new));
                    }
                    Err(error) => {
                        warn!(package = %current.name, %error, "update failed, keeping installed file");
                        outcome.failures.push(PackageFailure {
                            name: current.name,
                            error,
                        });
                    }
                }
            }
            Err(error) => {
                warn!(package = %current.name, %error, "could not re-resolve");
                outcome.failures.push(PackageFailure {
                    name: current.name,
                    error,
                });
            }
        }
    }

    state.replace_instance(instance)?;
    Ok(outcome)
}

/// Replaces `old` by `fresh`, restoring `old` if the new file fails.
async fn swap_package(instance: &mut Instance, old: ModData, fresh: ModData) -> ModmanResult<ModData> {
    let old_path = instance.artifact_path(&old)?;
    let same_name = old.filename == fresh.filename;
    let backup = same_name.then(|| backup_path(&old_path));
    if let Some(backup) = &backup {
        std::fs::rename(&old_path, backup).map_err(|e| FsError::io(&old_path, e))?;
    }

    let position = instance
        .packages
        .iter()
        .position(|p| p.project_id == old.project_id);
    instance.take_package(&old.project_id);

    match store::add_package(instance, fresh).await {
        Ok(new) => {
            let leftover = backup.unwrap_or(old_path);
            crate::utility::fs::remove_file_if_exists(&leftover)?;
            Ok(new)
        }
        Err(e) => {
            if let Some(backup) = &backup {
                std::fs::rename(backup, &old_path).map_err(|e| FsError::io(backup, e))?;
            }
            let at = position.unwrap_or(instance.packages.len()).min(instance.packages.len());
            instance.packages.insert(at, old);
            Err(e)
        }
    }
}

fn backup_path(path: &std::path::Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".old");
    path.with_file_name(name)
}

/// Name for the instance a migration creates.
///
/// `<name>_<version>`, with a local timestamp appended if that is taken.
#[must_use]
pub fn migration_name(state: &AppState, name: &str, game_version: &str) -> String {
    let candidate = format!("{name}_{game_version}");
    if state.contains_instance(&candidate) {
        format!("{candidate}_{}", Local::now().format("%Y%m%d%H%M%S"))
    } else {
        candidate
    }
}

/// Installs every top-level package of `source` into `target`.
async fn carry_packages(
    ctx: &Context,
    target: &mut Instance,
    source: &Instance,
) -> (Vec<InstallOutcome>, Vec<PackageFailure>) {
    let mut installed = Vec::new();
    let mut skipped = Vec::new();

    for package in source.top_level_packages() {
        if target.has_package(&package.project_id) {
            debug!(package = %package.name, "already carried by a cascade");
            continue;
        }
        match install(ctx, target, &PackageRef::of_record(package)).await {
            Ok(outcome) => installed.push(outcome),
            Err(e) if e.is_already_installed() => {}
            Err(error) => {
                warn!(package = %package.name, %error, "skipped");
                skipped.push(PackageFailure {
                    name: package.name.clone(),
                    error,
                });
            }
        }
    }
    (installed, skipped)
}

/// Creates a copy of instance `name` for `game_version` and makes it active.
///
/// The source instance is left untouched. Packages without a release for
/// the new version are reported in `skipped`. `persist` runs once the new
/// instance exists and before any package is carried over.
///
/// # Errors
///
/// Returns an error if the source is missing, the new instance cannot be
/// created, or `persist` fails.
#[instrument(skip(ctx, state, persist))]
pub async fn migrate<P>(
    ctx: &Context,
    state: &mut AppState,
    name: &str,
    game_version: &str,
    persist: P,
) -> ModmanResult<CarryOutcome>
where
    P: FnOnce(&AppState) -> ModmanResult<()>,
{
    let source = state.find_instance(name)?.clone();
    let new_name = migration_name(state, &source.name, game_version);

    let mut target = store::create(ctx, state, &new_name, game_version, source.loader).await?;
    persist(state)?;
    let (installed, skipped) = carry_packages(ctx, &mut target, &source).await;

    state.replace_instance(target)?;
    state.set_active(&new_name)?;
    info!(from = %source.name, to = %new_name, "migrated");

    Ok(CarryOutcome {
        instance: new_name,
        installed,
        skipped,
    })
}

/// Recreates an exported instance under its own name.
///
/// `persist` runs once the instance exists, before its packages install.
///
/// # Errors
///
/// Returns `DuplicateInstance` if the name is taken, any error from
/// creating the instance, or a failure of `persist`.
#[instrument(skip_all, fields(instance = %exported.name))]
pub async fn import<P>(
    ctx: &Context,
    state: &mut AppState,
    exported: &Instance,
    persist: P,
) -> ModmanResult<CarryOutcome>
where
    P: FnOnce(&AppState) -> ModmanResult<()>,
{
    let mut target = store::create(
        ctx,
        state,
        &exported.name,
        &exported.game_version,
        exported.loader,
    )
    .await?;
    persist(state)?;
    let (installed, skipped) = carry_packages(ctx, &mut target, exported).await;

    let name = target.name.clone();
    state.replace_instance(target)?;
    Ok(CarryOutcome {
        instance: name,
        installed,
        skipped,
    })
}
