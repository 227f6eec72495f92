// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collaborators shared by every store and sync operation.
//!
//! ```text
//! Config --> Context { layout, registries, loaders, launcher, profile }
//!                |
//!                +--> store::*(&Context, ..)
//!                +--> sync::*(&Context, &mut AppState, ..)
//! ```
//!
//! The context holds no mutable state; `AppState` is passed separately.

use crate::config::Config;
use crate::config::paths::Layout;
use crate::config::types::ProfileConfig;
use crate::error::Result;
use crate::launcher::LauncherProfiles;
use crate::loader::LoaderMeta;
use crate::registry::Registries;
use crate::state::StateFile;

/// Read-only handles built once per command.
#[derive(Debug, Clone)]
pub struct Context {
    layout: Layout,
    registries: Registries,
    loaders: LoaderMeta,
    launcher: LauncherProfiles,
    profile: ProfileConfig,
}

impl Context {
    /// Builds all clients from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the paths were not resolved.
    pub fn new(config: &Config) -> Result<Self> {
        let layout = Layout::from_config(&config.paths)?;
        Ok(Self {
            registries: Registries::new(&config.registries),
            loaders: LoaderMeta::new(&config.loaders),
            launcher: LauncherProfiles::new(layout.launcher_profiles()),
            profile: config.profile.clone(),
            layout,
        })
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub const fn registries(&self) -> &Registries {
        &self.registries
    }

    #[must_use]
    pub const fn loaders(&self) -> &LoaderMeta {
        &self.loaders
    }

    #[must_use]
    pub const fn launcher(&self) -> &LauncherProfiles {
        &self.launcher
    }

    /// Launcher profile defaults for new instances.
    #[must_use]
    pub const fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    /// The state document for this layout.
    #[must_use]
    pub fn state_file(&self) -> StateFile {
        StateFile::new(&self.layout)
    }
}
