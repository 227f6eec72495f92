// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Loader provisioning from the Fabric and Quilt meta services.
//!
//! ```text
//! latest_version(loader)
//!   fabric: GET /versions/loader -> first stable
//!   quilt:  GET /versions/loader -> first entry
//!
//! install_profile(state, loader, game, lv)
//!   id = <loader>-loader-<lv>-<game>
//!   id in state.installed_loader_versions? -> skip
//!   GET /versions/loader/<game>/<lv>/profile/json -> versions/<id>/<id>.json
//!
//! refresh_installer(state)    fabric only
//!   GET /versions/installer -> first stable -> installers/fabric-installer.jar
//! ```


use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::paths::Layout;
use crate::config::types::LoadersConfig;
use crate::error::{ModmanResult, NetworkError};
use crate::model::Loader;
use crate::net::{Downloader, ProgressDisplay};
use crate::state::AppState;

/// File name of the downloaded Fabric installer.
pub const FABRIC_INSTALLER_JAR: &str = "fabric-installer.jar";

#[derive(Debug, Deserialize)]
struct MetaVersion {
    version: String,
    #[serde(default)]
    stable: bool,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GameVersion {
    version: String,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    latest: LatestVersions,
}

#[derive(Debug, Deserialize)]
struct LatestVersions {
    release: String,
}

/// Whether `candidate` is a newer loader version than `current`.
///
/// Versions are compared as semver; when either side does not parse, any
/// difference counts as newer.
#[must_use]
pub fn is_newer(current: &str, candidate: &str) -> bool {
    if current.is_empty() {
        return !candidate.is_empty();
    }
    match (
        semver::Version::parse(current),
        semver::Version::parse(candidate),
    ) {
        (Ok(current), Ok(candidate)) => candidate > current,
        _ => current != candidate,
    }
}

/// Client for the loader meta services and the game version manifest.
#[derive(Debug, Clone)]
pub struct LoaderMeta {
    fabric_url: String,
    quilt_url: String,
    manifest_url: String,
}

impl LoaderMeta {
    #[must_use]
    pub fn new(config: &LoadersConfig) -> Self {
        Self {
            fabric_url: config.fabric_meta_url.trim_end_matches('/').to_string(),
            quilt_url: config.quilt_meta_url.trim_end_matches('/').to_string(),
            manifest_url: config.version_manifest_url.clone(),
        }
    }

    fn base(&self, loader: Loader) -> &str {
        match loader {
            Loader::Fabric => &self.fabric_url,
            Loader::Quilt => &self.quilt_url,
        }
    }

    async fn versions(&self, url: String) -> ModmanResult<Vec<MetaVersion>> {
        Downloader::new().url(url).silent().fetch_json().await
    }

    /// Latest loader version: first stable for Fabric, first listed for Quilt.
    ///
    /// # Errors
    ///
    /// Returns a transport error, or `NetworkError::Decode` if the list has no
    /// usable entry.
    #[instrument(skip(self))]
    pub async fn latest_version(&self, loader: Loader) -> ModmanResult<String> {
        let url = format!("{}/versions/loader", self.base(loader));
        let versions = self.versions(url.clone()).await?;
        let picked = match loader {
            Loader::Fabric => versions.into_iter().find(|v| v.stable),
            Loader::Quilt => versions.into_iter().next(),
        };
        let version = picked.map(|v| v.version).ok_or_else(|| NetworkError::Decode {
            url,
            message: format!("no {loader} loader version listed"),
        })?;
        debug!(%loader, %version, "latest loader version");
        Ok(version)
    }

    /// Whether the loader publishes builds for `game_version`.
    ///
    /// # Errors
    ///
    /// Returns a transport error.
    pub async fn supports_game_version(
        &self,
        loader: Loader,
        game_version: &str,
    ) -> ModmanResult<bool> {
        let versions: Vec<GameVersion> = Downloader::new()
            .url(format!("{}/versions/game", self.base(loader)))
            .silent()
            .fetch_json()
            .await?;
        Ok(versions.iter().any(|v| v.version == game_version))
    }

    /// Latest release from the game version manifest.
    ///
    /// # Errors
    ///
    /// Returns a transport error.
    pub async fn latest_game_version(&self) -> ModmanResult<String> {
        let manifest: VersionManifest = Downloader::new()
            .url(self.manifest_url.as_str())
            .silent()
            .fetch_json()
            .await?;
        Ok(manifest.latest.release)
    }

    /// Writes the launcher version profile for a loader build.
    ///
    /// Returns `false` when the profile was already installed.
    ///
    /// # Errors
    ///
    /// Returns a transport or filesystem error.
    #[instrument(skip(self, state, layout))]
    pub async fn install_profile(
        &self,
        state: &mut AppState,
        layout: &Layout,
        loader: Loader,
        game_version: &str,
        loader_version: &str,
    ) -> ModmanResult<bool> {
        let id = loader.profile_id(loader_version, game_version);
        if state.installed_loader_versions.contains(&id) {
            debug!(%id, "loader profile already installed");
            return Ok(false);
        }

        Downloader::new()
            .url(format!(
                "{}/versions/loader/{game_version}/{loader_version}/profile/json",
                self.base(loader)
            ))
            .file(layout.loader_profile(&id))
            .label(format!("{id} profile"))
            .progress(ProgressDisplay::Spinner)
            .download()
            .await?;

        info!(%id, "installed loader profile");
        state.installed_loader_versions.insert(id);
        Ok(true)
    }

    /// Downloads the latest stable Fabric installer if it changed.
    ///
    /// Returns the new version when a download happened.
    ///
    /// # Errors
    ///
    /// Returns a transport or filesystem error.
    #[instrument(skip(self, state, layout))]
    pub async fn refresh_installer(
        &self,
        state: &mut AppState,
        layout: &Layout,
    ) -> ModmanResult<Option<String>> {
        let url = format!("{}/versions/installer", self.fabric_url);
        let latest = self
            .versions(url.clone())
            .await?
            .into_iter()
            .find(|v| v.stable)
            .ok_or_else(|| NetworkError::Decode {
                url: url.clone(),
                message: "no stable installer listed".to_string(),
            })?;

        if state.installer_version.as_deref() == Some(latest.version.as_str()) {
            debug!(version = %latest.version, "installer up to date");
            return Ok(None);
        }

        let jar_url = latest.url.ok_or_else(|| NetworkError::Decode {
            url,
            message: format!("installer {} has no url", latest.version),
        })?;
        Downloader::new()
            .url(jar_url)
            .file(layout.installers_dir().join(FABRIC_INSTALLER_JAR))
            .label(format!("fabric installer {}", latest.version))
            .download()
            .await?;

        info!(version = %latest.version, "installed fabric installer");
        state.installer_version = Some(latest.version.clone());
        Ok(Some(latest.version))
    }
}
