// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! File selection shared by every registry.
//!
//! ```text
//! candidates (registry listing order)
//!     |
//!     +-- filter: loader tag matches AND game version listed
//!     |
//!     +-- newest publish timestamp wins
//!         ties (or no timestamps): first in listing order
//! ```

use chrono::{DateTime, Utc};

use crate::error::{ModmanResult, RegistryError};
use crate::model::Loader;

/// A published file as seen by the matcher.
pub trait ReleaseFile {
    /// Loader tags declared by the file.
    fn loaders(&self) -> &[String];

    /// Game versions the file declares support for.
    fn game_versions(&self) -> &[String];

    /// Publish timestamp, when the registry exposes one.
    fn published(&self) -> Option<DateTime<Utc>>;

    /// Whether the file can be installed at all.
    fn is_installable(&self) -> bool {
        true
    }

    fn supports(&self, loader: Loader, game_version: &str) -> bool {
        self.is_installable()
            && self
                .loaders()
                .iter()
                .any(|l| l.eq_ignore_ascii_case(loader.as_str()))
            && self.game_versions().iter().any(|v| v == game_version)
    }
}

/// Picks the newest file supporting `loader` and `game_version`.
///
/// Only a strictly newer timestamp displaces the current pick, so equal or
/// missing timestamps keep the earliest entry.
pub fn select_best<F: ReleaseFile>(
    files: &[F],
    loader: Loader,
    game_version: &str,
) -> Option<usize> {
    let mut best: Option<(usize, Option<DateTime<Utc>>)> = None;
    for (idx, file) in files.iter().enumerate() {
        if !file.supports(loader, game_version) {
            continue;
        }
        let published = file.published();
        match best {
            Some((_, current)) if published <= current => {}
            _ => best = Some((idx, published)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Like [`select_best`], failing with `NoMatchingVersion` on an empty match.
///
/// # Errors
///
/// Returns `RegistryError::NoMatchingVersion` when no file qualifies.
pub fn match_version<F: ReleaseFile>(
    mut files: Vec<F>,
    project: &str,
    loader: Loader,
    game_version: &str,
) -> ModmanResult<F> {
    select_best(&files, loader, game_version)
        .map(|idx| files.swap_remove(idx))
        .ok_or_else(|| {
            RegistryError::NoMatchingVersion {
                project: project.to_string(),
                loader: loader.to_string(),
                game_version: game_version.to_string(),
            }
            .into()
        })
}
