// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for modman-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! modman [global options] <command>
//! init
//! ls | list
//! make <name> [version] [--loader fabric|quilt]
//! use <name>
//! rm | remove <name> [-y]
//! install [-c] <mods..> [-y]
//! uninstall <mods..> [--force]
//! lsmod
//! update
//! migrate <version>
//! export [name]
//! import <file>
//! options | configs | version
//! ```

pub mod global;
pub mod instance;
pub mod package;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::instance::{ExportArgs, ImportArgs, MakeArgs, MigrateArgs, RemoveArgs, UseArgs};
use crate::cli::package::{InstallArgs, UninstallArgs};
use clap::{Parser, Subcommand};

/// Minecraft instance and mod manager.
#[derive(Debug, Parser)]
#[command(
    name = "modman",
    author,
    version,
    about = "Minecraft instance and mod manager",
    long_about = "modman-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps Fabric and Quilt instances next to the official launcher,\n\
                  each with its own mods folder and launcher profile. Mods come\n\
                  from Modrinth by default; prefix an id with `c:` (or pass -c)\n\
                  to use CurseForge.",
    after_help = "CONFIG FILES:\n\n\
                  modman reads <config dir>/modman/modman.toml, then modman.toml in\n\
                  the current directory, then every --config in order. MODMAN_*\n\
                  environment variables (MODMAN_PATHS__MINECRAFT=...) and --set\n\
                  override files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files that were loaded.
    Configs,

    /// Creates the work directory and fetches the Fabric installer.
    Init,

    /// Lists instances.
    #[command(visible_alias = "ls")]
    List,

    /// Creates an instance and makes it active.
    Make(MakeArgs),

    /// Selects the active instance.
    Use(UseArgs),

    /// Deletes an instance with its mods and launcher profile.
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),

    /// Installs mods (and their required dependencies) into the active instance.
    Install(InstallArgs),

    /// Removes mods from the active instance.
    Uninstall(UninstallArgs),

    /// Lists the mods of the active instance.
    Lsmod,

    /// Updates the loader and every mod of the active instance.
    Update,

    /// Copies the active instance to another game version.
    Migrate(MigrateArgs),

    /// Writes an instance to the exports directory.
    Export(ExportArgs),

    /// Recreates an exported instance.
    Import(ImportArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
