// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Instance command arguments.

use clap::Args;
use std::path::PathBuf;

use crate::model::Loader;

/// Arguments for `make`.
#[derive(Debug, Clone, Args)]
pub struct MakeArgs {
    /// Instance name (unique, case-insensitive).
    pub name: String,

    /// Minecraft version; the latest release when omitted.
    pub version: Option<String>,

    /// Mod loader (fabric or quilt); `loaders.default` when omitted.
    #[arg(short = 'L', long)]
    pub loader: Option<Loader>,
}

/// Arguments for `use`.
#[derive(Debug, Clone, Args)]
pub struct UseArgs {
    /// Instance to make active.
    pub name: String,
}

/// Arguments for `remove`.
#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Instance to delete.
    pub name: String,

    /// Do not ask for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `migrate`.
#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Target Minecraft version.
    pub version: String,
}

/// Arguments for `export`.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Instance to export; the active one when omitted.
    pub name: Option<String>,
}

/// Arguments for `import`.
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// File written by `export`.
    pub file: PathBuf,
}
