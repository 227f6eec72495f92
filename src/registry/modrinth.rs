// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Modrinth v2 API.
//!
//! ```text
//! GET /project/{slug|id}          --> title, slug, id    (404 = NotFound)
//! GET /project/{id}/version       --> versions, newest first
//! GET /search?query=..            --> hits (CLI fallback only)
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::matcher::{ReleaseFile, match_version};
use super::{checked_filename, endpoint, not_found_on_404};
use crate::error::{ModmanResult, NetworkError, RegistryError};
use crate::model::{DependencyRef, Loader, ModData, Platform};
use crate::net::Downloader;

#[derive(Debug, Deserialize)]
struct Project {
    id: String,
    slug: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct Version {
    id: String,
    #[serde(default)]
    version_number: String,
    #[serde(default)]
    game_versions: Vec<String>,
    #[serde(default)]
    loaders: Vec<String>,
    #[serde(default)]
    date_published: Option<DateTime<Utc>>,
    #[serde(default)]
    files: Vec<VersionFile>,
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    url: String,
    filename: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    project_id: Option<String>,
    version_id: Option<String>,
    dependency_type: String,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    slug: String,
    #[serde(default)]
    categories: Vec<String>,
}

impl ReleaseFile for Version {
    fn loaders(&self) -> &[String] {
        &self.loaders
    }

    fn game_versions(&self) -> &[String] {
        &self.game_versions
    }

    fn published(&self) -> Option<DateTime<Utc>> {
        self.date_published
    }

    fn is_installable(&self) -> bool {
        !self.files.is_empty()
    }
}

impl Version {
    fn primary_file(&self) -> Option<&VersionFile> {
        self.files
            .iter()
            .find(|f| f.primary)
            .or_else(|| self.files.first())
    }

    fn dependency_refs(&self) -> Vec<DependencyRef> {
        self.dependencies
            .iter()
            .filter_map(|d| {
                let required = match d.dependency_type.as_str() {
                    "required" => true,
                    "optional" => false,
                    _ => return None,
                };
                // Version-only references carry no project id to cascade on.
                let project_id = d.project_id.clone()?;
                Some(DependencyRef {
                    name: project_id.clone(),
                    project_id,
                    version_id: d.version_id.clone(),
                    required,
                })
            })
            .collect()
    }
}

/// Client for the Modrinth API.
#[derive(Debug, Clone)]
pub struct ModrinthClient {
    base_url: String,
}

impl ModrinthClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request(url: &reqwest::Url) -> Downloader {
        Downloader::new()
            .url(url.as_str())
            .header("accept", "application/json")
            .silent()
    }

    /// Resolves a slug or project id to the best file.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` for an unknown project,
    /// `RegistryError::NoMatchingVersion` when no version fits, and any
    /// transport error unchanged.
    #[instrument(skip(self), fields(platform = "modrinth"))]
    pub async fn resolve(
        &self,
        slug_or_id: &str,
        loader: Loader,
        game_version: &str,
    ) -> ModmanResult<ModData> {
        let project_url = endpoint(&self.base_url, &["project", slug_or_id], &[])?;
        let project: Project = Self::request(&project_url)
            .fetch_json()
            .await
            .map_err(|e| not_found_on_404(e, Platform::Modrinth, slug_or_id))?;

        let versions_url =
            endpoint(&self.base_url, &["project", project.id.as_str(), "version"], &[])?;
        let versions: Vec<Version> = Self::request(&versions_url).fetch_json().await?;
        debug!(project = %project.slug, candidates = versions.len(), "versions listed");

        let version = match_version(versions, &project.title, loader, game_version)?;
        let file = version
            .primary_file()
            .ok_or_else(|| NetworkError::Decode {
                url: versions_url.to_string(),
                message: format!("version {} has no files", version.id),
            })?;
        let filename = checked_filename(file.filename.clone(), versions_url.as_str())?;

        Ok(ModData {
            platform: Platform::Modrinth,
            project_slug: project.slug,
            project_id: project.id,
            file_id: version.id.clone(),
            name: project.title,
            resolved_version: version.version_number.clone(),
            download_url: file.url.clone(),
            filename,
            dependencies: version.dependency_refs(),
            is_dependency: false,
        })
    }

    /// Free-text search; returns the first hit's slug if it is tagged with
    /// `loader`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NoSearchHit` when the first hit does not fit,
    /// or a transport error.
    #[instrument(skip(self), fields(platform = "modrinth"))]
    pub async fn search(&self, query: &str, loader: Loader) -> ModmanResult<String> {
        let url = endpoint(&self.base_url, &["search"], &[("query", query)])?;
        let result: SearchResult = Self::request(&url).fetch_json().await?;

        result
            .hits
            .into_iter()
            .next()
            .filter(|hit| {
                hit.categories
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(loader.as_str()))
            })
            .map(|hit| hit.slug)
            .ok_or_else(|| {
                RegistryError::NoSearchHit {
                    query: query.to_string(),
                    loader: loader.to_string(),
                }
                .into()
            })
    }
}
