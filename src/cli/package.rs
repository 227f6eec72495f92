// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command arguments.
//!
//! ```text
//! install sodium lithium        Modrinth slugs or ids
//! install c:jei 238222          CurseForge slug or numeric id
//! install -c jei                everything on CurseForge
//! uninstall "Fabric API" --force
//! ```

use clap::Args;

/// Arguments for `install`.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// Mods to install.
    #[arg(required = true, value_name = "MOD")]
    pub mods: Vec<String>,

    /// Look every mod up on CurseForge.
    #[arg(short = 'c', long)]
    pub curseforge: bool,

    /// Accept search suggestions without asking.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `uninstall`.
#[derive(Debug, Clone, Args)]
pub struct UninstallArgs {
    /// Mods to remove, by name, slug or project id.
    #[arg(required = true, value_name = "MOD")]
    pub mods: Vec<String>,

    /// Remove even if other installed mods require it.
    #[arg(short = 'f', long)]
    pub force: bool,
}
