// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package commands on the active instance: install, uninstall, lsmod.
//!
//! ```text
//! install <id>
//!   PackageRef::parse --> sync::install
//!     NotFound / NoMatchingVersion --> Modrinth search --> confirm --> retry
//! uninstall <query>
//!   lookup by name/slug --> required by others? (unless --force) --> remove
//! ```

use anyhow::bail;
use tracing::{debug, warn};

use crate::cli::package::{InstallArgs, UninstallArgs};
use crate::cmd::{Session, confirm};
use crate::context::Context;
use crate::error::{ModmanError, ModmanResult, Result, StoreError};
use crate::model::Instance;
use crate::registry::PackageRef;
use crate::store;
use crate::sync::{self, InstallOutcome};

/// Installs mods into the active instance.
///
/// Every mod is attempted; the command fails afterwards if any did.
///
/// # Errors
///
/// Returns an error if there is no active instance or a mod could not be
/// installed.
pub async fn run_install_command(args: &InstallArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let mut instance = session.state.active()?.clone();
    let mut failed = 0usize;

    for identifier in &args.mods {
        let package = PackageRef::parse(identifier, args.curseforge);
        match install_with_fallback(ctx, &mut instance, &package, args.yes).await {
            Ok(Some(outcome)) => print_install(&outcome),
            Ok(None) => println!("Skipped {identifier}"),
            Err(e) if e.is_already_installed() => println!("{e}"),
            Err(e) => {
                eprintln!("Could not install {identifier}: {e}");
                failed += 1;
            }
        }
    }

    session.state.replace_instance(instance)?;
    session.save()?;

    if failed > 0 {
        bail!("{failed} of {} mods could not be installed", args.mods.len());
    }
    Ok(())
}

/// Installs `package`, offering a Modrinth search hit when it cannot be
/// resolved. `None` means the user declined the suggestion.
async fn install_with_fallback(
    ctx: &Context,
    instance: &mut Instance,
    package: &PackageRef,
    assume_yes: bool,
) -> ModmanResult<Option<InstallOutcome>> {
    let error = match sync::install(ctx, instance, package).await {
        Ok(outcome) => return Ok(Some(outcome)),
        Err(e) if e.is_not_found() || e.is_no_matching_version() => e,
        Err(e) => return Err(e),
    };

    let suggestion = match ctx.registries().search(package.id(), instance.loader).await {
        Ok(found) if found != *package => found,
        Ok(_) => return Err(error),
        Err(search_error) => {
            debug!(%search_error, "search found nothing better");
            return Err(error);
        }
    };

    warn!(%error, %suggestion, "falling back to search result");
    if !assume_yes && !confirm(&format!("{error}. Install {suggestion} instead?")) {
        return Ok(None);
    }
    sync::install(ctx, instance, &suggestion).await.map(Some)
}

pub(crate) fn print_install(outcome: &InstallOutcome) {
    let record = &outcome.record;
    println!(
        "Installed {} {} ({})",
        record.name, record.resolved_version, record.platform
    );
    for dependency in &outcome.dependencies {
        println!(
            "  + {} {} (dependency)",
            dependency.name, dependency.resolved_version
        );
    }
    for failure in &outcome.failures {
        eprintln!(
            "  ! dependency {} of {}: {}",
            failure.project_id, failure.parent, failure.error
        );
    }
}

/// Removes mods from the active instance.
///
/// # Errors
///
/// Returns an error if there is no active instance, a mod is not installed,
/// or a mod is still required by another one and `--force` was not given.
pub fn run_uninstall_command(args: &UninstallArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let mut instance = session.state.active()?.clone();
    let mut failed = 0usize;

    for query in &args.mods {
        match uninstall(&mut instance, query, args.force) {
            Ok(name) => println!("Removed {name}"),
            Err(e) => {
                eprintln!("Could not uninstall {query}: {e}");
                failed += 1;
            }
        }
    }

    session.state.replace_instance(instance)?;
    session.save()?;

    if failed > 0 {
        bail!("{failed} of {} mods could not be removed", args.mods.len());
    }
    Ok(())
}

pub(crate) fn uninstall(instance: &mut Instance, query: &str, force: bool) -> ModmanResult<String> {
    let Some(record) = instance.lookup(query) else {
        return Err(ModmanError::Other(
            format!("{query} is not installed in {}", instance.name).into_boxed_str(),
        ));
    };
    let (project_id, name) = (record.project_id.clone(), record.name.clone());

    let dependents: Vec<String> = instance
        .dependents_of(&project_id)
        .into_iter()
        .map(|p| p.name.clone())
        .collect();
    if !dependents.is_empty() {
        if !force {
            return Err(StoreError::RequiredBy { name, dependents }.into());
        }
        warn!(package = %name, dependents = %dependents.join(", "), "removing a required mod");
    }

    store::remove_package(instance, &project_id)?;
    Ok(name)
}

/// Lists the packages of the active instance.
///
/// # Errors
///
/// Returns an error if there is no active instance.
pub fn run_lsmod_command(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let instance = session.state.active()?;

    println!(
        "{} ({} {} {})",
        instance.name, instance.game_version, instance.loader, instance.loader_version
    );
    if instance.packages.is_empty() {
        println!("  no mods installed");
        return Ok(());
    }
    for package in &instance.packages {
        let tag = if package.is_dependency {
            ", dependency"
        } else {
            ""
        };
        println!(
            "  {} {} [{}{tag}]",
            package.name, package.resolved_version, package.platform
        );
    }
    Ok(())
}
