// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Instance commands: list, make, use, remove, update, migrate, export, import.

use anyhow::bail;
use tracing::info;

use crate::cli::instance::{ExportArgs, ImportArgs, MakeArgs, MigrateArgs, RemoveArgs, UseArgs};
use crate::cmd::package::print_install;
use crate::cmd::{Session, confirm};
use crate::context::Context;
use crate::error::Result;
use crate::model::Loader;
use crate::store;
use crate::sync::{self, CarryOutcome, UpdateOutcome};

/// Lists instances, marking the active one with `*`.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded.
pub fn run_list_command(ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let state = &session.state;

    if state.instances.is_empty() {
        println!("No instances (create one with `modman make <name>`)");
        return Ok(());
    }

    for instance in &state.instances {
        let marker = if state.active_instance.as_deref() == Some(instance.name.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {} ({} {} {}, {} mods)",
            instance.name,
            instance.game_version,
            instance.loader,
            instance.loader_version,
            instance.packages.len()
        );
    }
    Ok(())
}

/// Creates an instance and makes it active.
///
/// # Errors
///
/// Returns an error if the loader has no build for the game version or the
/// instance cannot be created.
pub async fn run_make_command(args: &MakeArgs, ctx: &Context, default_loader: Loader) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let loader = args.loader.unwrap_or(default_loader);

    let game_version = match &args.version {
        Some(version) => version.clone(),
        None => ctx.loaders().latest_game_version().await?,
    };
    if !ctx
        .loaders()
        .supports_game_version(loader, &game_version)
        .await?
    {
        bail!("{loader} does not support minecraft {game_version}");
    }

    let instance = store::create(ctx, &mut session.state, &args.name, &game_version, loader).await?;
    session.state.set_active(&instance.name)?;
    session.save()?;

    println!(
        "Created {} ({game_version}, {loader} {}) and made it active",
        instance.name, instance.loader_version
    );
    Ok(())
}

/// Makes an instance active.
///
/// # Errors
///
/// Returns an error if the instance does not exist.
pub fn run_use_command(args: &UseArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    session.state.set_active(&args.name)?;
    session.save()?;
    println!("Now using {}", session.state.active_name()?);
    Ok(())
}

/// Deletes an instance after confirmation.
///
/// # Errors
///
/// Returns an error if the instance does not exist or cannot be deleted.
pub fn run_remove_command(args: &RemoveArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let name = session.state.find_instance(&args.name)?.name.clone();

    if !args.yes && !confirm(&format!("Delete instance {name} and all its mods?")) {
        println!("Aborted");
        return Ok(());
    }

    store::delete(ctx, &mut session.state, &name)?;
    session.save()?;
    println!("Removed {name}");
    Ok(())
}

/// Updates the loader and every package of the active instance.
///
/// # Errors
///
/// Returns an error if there is no active instance or the loader refresh
/// fails.
pub async fn run_update_command(ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let name = session.state.active_name()?.to_string();

    let outcome = sync::update(ctx, &mut session.state, &name).await?;
    session.save()?;
    print_update(&name, &outcome);
    Ok(())
}

fn print_update(name: &str, outcome: &UpdateOutcome) {
    if let Some((old, new)) = &outcome.loader {
        println!("Loader {old} -> {new}");
    }
    for (old, new) in &outcome.updated {
        println!(
            "Updated {} {} -> {}",
            new.name, old.resolved_version, new.resolved_version
        );
    }
    for failure in &outcome.failures {
        eprintln!("Could not update {}: {}", failure.name, failure.error);
    }
    println!(
        "{name}: {} updated, {} unchanged, {} failed",
        outcome.updated.len(),
        outcome.unchanged,
        outcome.failures.len()
    );
}

/// Copies the active instance to another game version.
///
/// # Errors
///
/// Returns an error if there is no active instance or the new instance
/// cannot be created.
pub async fn run_migrate_command(args: &MigrateArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx)?;
    let source = session.state.active()?;
    let (name, loader) = (source.name.clone(), source.loader);

    if !ctx
        .loaders()
        .supports_game_version(loader, &args.version)
        .await?
    {
        bail!("{loader} does not support minecraft {}", args.version);
    }

    let (file, state) = session.split();
    let outcome =
        sync::migrate(ctx, state, &name, &args.version, |state| file.save(state)).await?;
    session.save()?;
    print_carry(&outcome);
    println!("Now using {}", outcome.instance);
    Ok(())
}

/// Writes an instance to the exports directory.
///
/// # Errors
///
/// Returns an error if the instance does not exist or the file cannot be
/// written.
pub fn run_export_command(args: &ExportArgs, ctx: &Context) -> Result<()> {
    let session = Session::open(ctx)?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => session.state.active_name()?.to_string(),
    };
    let path = store::export(ctx, &session.state, &name)?;
    println!("Exported {name} to {}", path.display());
    Ok(())
}

/// Recreates an exported instance and installs its packages.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the instance cannot be
/// created.
pub async fn run_import_command(args: &ImportArgs, ctx: &Context) -> Result<()> {
    let exported = store::read_export(&args.file)?;
    let mut session = Session::open(ctx)?;

    let (file, state) = session.split();
    let outcome = sync::import(ctx, state, &exported, |state| file.save(state)).await?;
    session.save()?;
    info!(instance = %outcome.instance, file = %args.file.display(), "imported");
    print_carry(&outcome);
    Ok(())
}

fn print_carry(outcome: &CarryOutcome) {
    for installed in &outcome.installed {
        print_install(installed);
    }
    for skipped in &outcome.skipped {
        eprintln!("Skipped {}: {}", skipped.name, skipped.error);
    }
    println!(
        "{}: {} installed, {} skipped",
        outcome.instance,
        outcome.installed.len(),
        outcome.skipped.len()
    );
}
