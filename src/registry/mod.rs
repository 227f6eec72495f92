// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package registries.
//!
//! ```text
//! "c:jei" / "238222"  --> PackageRef::CurseForge --> CurseForgeClient::resolve
//! "sodium"            --> PackageRef::Modrinth   --> ModrinthClient::resolve
//!                                                        |
//!                                                        v
//!                                            matcher::match_version --> ModData
//! ```
//!
//! Both clients normalize into [`ModData`]. A 404 on the project lookup
//! becomes `RegistryError::NotFound`; every other HTTP or transport failure
//! is returned as the `NetworkError` it was.

pub mod curseforge;
pub mod matcher;
pub mod modrinth;


use std::fmt;

use crate::config::types::RegistriesConfig;
use crate::error::{ModmanError, ModmanResult, NetworkError, RegistryError};
use crate::model::{Loader, ModData, Platform, is_plain_file_name};

use curseforge::CurseForgeClient;
use modrinth::ModrinthClient;

/// Marker selecting CurseForge for an identifier.
pub const CURSEFORGE_PREFIX: &str = "c:";

/// A package identifier bound to the registry that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageRef {
    CurseForge(String),
    Modrinth(String),
}

impl PackageRef {
    /// Classifies a user-supplied identifier.
    ///
    /// `c:<id-or-slug>`, an all-digits id, or `force_curseforge` select
    /// CurseForge; anything else is a Modrinth slug or id.
    #[must_use]
    pub fn parse(identifier: &str, force_curseforge: bool) -> Self {
        let identifier = identifier.trim();
        if let Some(rest) = identifier.strip_prefix(CURSEFORGE_PREFIX) {
            return Self::CurseForge(rest.to_string());
        }
        let numeric = !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit());
        if force_curseforge || numeric {
            Self::CurseForge(identifier.to_string())
        } else {
            Self::Modrinth(identifier.to_string())
        }
    }

    /// Reference to `id` on a known platform.
    #[must_use]
    pub fn for_platform(platform: Platform, id: impl Into<String>) -> Self {
        match platform {
            Platform::CurseForge => Self::CurseForge(id.into()),
            Platform::Modrinth => Self::Modrinth(id.into()),
        }
    }

    /// Reference that re-resolves an installed record on its own platform.
    #[must_use]
    pub fn of_record(record: &ModData) -> Self {
        Self::for_platform(record.platform, record.project_id.clone())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::CurseForge(id) | Self::Modrinth(id) => id,
        }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::CurseForge(_) => Platform::CurseForge,
            Self::Modrinth(_) => Platform::Modrinth,
        }
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurseForge(id) => write!(f, "{CURSEFORGE_PREFIX}{id}"),
            Self::Modrinth(id) => f.write_str(id),
        }
    }
}

/// The configured registry clients.
#[derive(Debug, Clone)]
pub struct Registries {
    modrinth: ModrinthClient,
    curseforge: CurseForgeClient,
}

impl Registries {
    #[must_use]
    pub fn new(config: &RegistriesConfig) -> Self {
        Self {
            modrinth: ModrinthClient::new(&config.modrinth_url),
            curseforge: CurseForgeClient::new(
                &config.curseforge_url,
                &config.curseforge_key,
                config.curseforge_game_id,
            ),
        }
    }

    #[must_use]
    pub const fn modrinth(&self) -> &ModrinthClient {
        &self.modrinth
    }

    #[must_use]
    pub const fn curseforge(&self) -> &CurseForgeClient {
        &self.curseforge
    }

    /// Resolves a package on the registry its reference names.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `NoMatchingVersion` or a transport error.
    pub async fn resolve(
        &self,
        package: &PackageRef,
        loader: Loader,
        game_version: &str,
    ) -> ModmanResult<ModData> {
        match package {
            PackageRef::CurseForge(id) => self.curseforge.resolve(id, loader, game_version).await,
            PackageRef::Modrinth(id) => self.modrinth.resolve(id, loader, game_version).await,
        }
    }

    /// Looks a free-text query up on Modrinth.
    ///
    /// # Errors
    ///
    /// Returns `NoSearchHit` or a transport error.
    pub async fn search(&self, query: &str, loader: Loader) -> ModmanResult<PackageRef> {
        self.modrinth
            .search(query, loader)
            .await
            .map(PackageRef::Modrinth)
    }
}

/// Rewrites an HTTP 404 into `RegistryError::NotFound`, leaving anything else
/// untouched.
pub(crate) fn not_found_on_404(err: ModmanError, platform: Platform, query: &str) -> ModmanError {
    match err {
        ModmanError::Network(e) if e.is_http_not_found() => RegistryError::NotFound {
            platform: platform.to_string(),
            query: query.to_string(),
        }
        .into(),
        other => other,
    }
}

/// Builds `base/seg/seg..?k=v`, escaping every segment as a single path
/// component.
pub(crate) fn endpoint(
    base: &str,
    segments: &[&str],
    params: &[(&str, &str)],
) -> ModmanResult<reqwest::Url> {
    let mut url =
        reqwest::Url::parse(base).map_err(|e| NetworkError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| NetworkError::InvalidUrl(format!("{base} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// Accepts a registry filename only if it stays inside the instance
/// directory.
pub(crate) fn checked_filename(filename: String, listing: &str) -> ModmanResult<String> {
    if is_plain_file_name(&filename) {
        Ok(filename)
    } else {
        Err(NetworkError::Decode {
            url: listing.to_string(),
            message: format!("unsafe file name '{filename}'"),
        }
        .into())
    }
}
