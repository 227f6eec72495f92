// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CurseForge core API (v1).
//!
//! ```text
//! numeric id  --> GET /mods/{id}                        (404 = NotFound)
//! slug        --> GET /mods/search?gameId=..&slug=..    (no exact hit = NotFound)
//!             --> GET /mods/{id}/files?gameVersion=..&modLoaderType=..&index=..
//!                 repeated until `pagination.totalCount` files are read
//! ```
//!
//! Loaders appear in a file's `gameVersions` next to the game versions.
//! Files with a null `downloadUrl` are not distributable and never picked.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::matcher::{ReleaseFile, match_version};
use super::{checked_filename, endpoint, not_found_on_404};
use crate::error::{ModmanResult, RegistryError};
use crate::model::{DependencyRef, Loader, ModData, Platform};
use crate::net::Downloader;

const RELATION_OPTIONAL: u32 = 2;
const RELATION_REQUIRED: u32 = 3;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    total_count: usize,
}

#[derive(Debug, Deserialize)]
struct Project {
    id: u64,
    name: String,
    slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct File {
    id: u64,
    #[serde(default)]
    display_name: String,
    file_name: String,
    #[serde(default)]
    file_date: Option<DateTime<Utc>>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    game_versions: Vec<String>,
    #[serde(default)]
    dependencies: Vec<FileDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDependency {
    mod_id: u64,
    relation_type: u32,
}

impl ReleaseFile for File {
    // CurseForge mixes loader names into the game version list.
    fn loaders(&self) -> &[String] {
        &self.game_versions
    }

    fn game_versions(&self) -> &[String] {
        &self.game_versions
    }

    fn published(&self) -> Option<DateTime<Utc>> {
        self.file_date
    }

    fn is_installable(&self) -> bool {
        self.download_url.is_some()
    }
}

impl File {
    fn dependency_refs(&self) -> Vec<DependencyRef> {
        self.dependencies
            .iter()
            .filter_map(|d| {
                let required = match d.relation_type {
                    RELATION_REQUIRED => true,
                    RELATION_OPTIONAL => false,
                    _ => return None,
                };
                Some(DependencyRef {
                    project_id: d.mod_id.to_string(),
                    version_id: None,
                    name: d.mod_id.to_string(),
                    required,
                })
            })
            .collect()
    }
}

/// CurseForge's numeric `modLoaderType` for a loader.
const fn mod_loader_type(loader: Loader) -> &'static str {
    match loader {
        Loader::Fabric => "4",
        Loader::Quilt => "5",
    }
}

/// Client for the CurseForge API.
#[derive(Debug, Clone)]
pub struct CurseForgeClient {
    base_url: String,
    api_key: String,
    game_id: u32,
}

impl CurseForgeClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, game_id: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            game_id,
        }
    }

    fn request(&self, url: &reqwest::Url) -> Downloader {
        let request = Downloader::new()
            .url(url.as_str())
            .header("accept", "application/json")
            .silent();
        if self.api_key.is_empty() {
            request
        } else {
            request.header("x-api-key", self.api_key.as_str())
        }
    }

    async fn project(&self, slug_or_id: &str) -> ModmanResult<Project> {
        if !slug_or_id.is_empty() && slug_or_id.bytes().all(|b| b.is_ascii_digit()) {
            let url = endpoint(&self.base_url, &["mods", slug_or_id], &[])?;
            let envelope: Envelope<Project> = self
                .request(&url)
                .fetch_json()
                .await
                .map_err(|e| not_found_on_404(e, Platform::CurseForge, slug_or_id))?;
            return Ok(envelope.data);
        }

        let game_id = self.game_id.to_string();
        let url = endpoint(
            &self.base_url,
            &["mods", "search"],
            &[("gameId", game_id.as_str()), ("slug", slug_or_id)],
        )?;
        let envelope: Envelope<Vec<Project>> = self.request(&url).fetch_json().await?;
        envelope
            .data
            .into_iter()
            .find(|p| p.slug.eq_ignore_ascii_case(slug_or_id))
            .ok_or_else(|| {
                RegistryError::NotFound {
                    platform: Platform::CurseForge.to_string(),
                    query: slug_or_id.to_string(),
                }
                .into()
            })
    }

    /// Every file of `project_id` for `game_version` and `loader`, across
    /// all result pages.
    async fn files(
        &self,
        project_id: &str,
        loader: Loader,
        game_version: &str,
    ) -> ModmanResult<Vec<File>> {
        let mut files = Vec::new();
        loop {
            let index = files.len().to_string();
            let url = endpoint(
                &self.base_url,
                &["mods", project_id, "files"],
                &[
                    ("gameVersion", game_version),
                    ("modLoaderType", mod_loader_type(loader)),
                    ("index", index.as_str()),
                ],
            )?;
            let page: Page<File> = self.request(&url).fetch_json().await?;
            let received = page.data.len();
            files.extend(page.data);

            let total = page.pagination.map_or(0, |p| p.total_count);
            if received == 0 || files.len() >= total {
                return Ok(files);
            }
            debug!(project_id, read = files.len(), total, "fetching next page");
        }
    }

    /// Resolves a slug or numeric mod id to the best file.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` for an unknown project,
    /// `RegistryError::NoMatchingVersion` when no file fits, and any
    /// transport error unchanged.
    #[instrument(skip(self), fields(platform = "curseforge"))]
    pub async fn resolve(
        &self,
        slug_or_id: &str,
        loader: Loader,
        game_version: &str,
    ) -> ModmanResult<ModData> {
        let project = self.project(slug_or_id).await?;
        let project_id = project.id.to_string();
        let files = self.files(&project_id, loader, game_version).await?;
        debug!(project = %project.slug, candidates = files.len(), "files listed");

        let file = match_version(files, &project.name, loader, game_version)?;
        let dependencies = file.dependency_refs();
        let listing = endpoint(&self.base_url, &["mods", project_id.as_str(), "files"], &[])?;
        let filename = checked_filename(file.file_name, listing.as_str())?;

        Ok(ModData {
            platform: Platform::CurseForge,
            project_slug: project.slug,
            project_id,
            file_id: file.id.to_string(),
            name: project.name,
            resolved_version: file.display_name,
            download_url: file.download_url.unwrap_or_default(),
            filename,
            dependencies,
            is_dependency: false,
        })
    }
}
