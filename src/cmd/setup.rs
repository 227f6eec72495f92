// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `init` command: work directory, state file and Fabric installer.

use tracing::info;

use crate::cmd::Session;
use crate::context::Context;
use crate::error::Result;

/// Creates the work directory and state, then fetches the installer.
///
/// Safe to run again; an existing state is kept.
///
/// # Errors
///
/// Returns an error if the directories cannot be created or the installer
/// cannot be downloaded.
pub async fn run_init_command(ctx: &Context) -> Result<()> {
    ctx.state_file().init(ctx.layout())?;

    let mut session = Session::open(ctx)?;
    let refreshed = ctx
        .loaders()
        .refresh_installer(&mut session.state, ctx.layout())
        .await?;
    session.save()?;

    match refreshed {
        Some(version) => info!(%version, "fabric installer ready"),
        None => info!("fabric installer already current"),
    }
    println!("modman is set up at {}", ctx.layout().work_dir().display());
    Ok(())
}
