// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reads the mod manifest embedded in a downloaded jar.
//!
//! ```text
//! jar (zip)
//!   fabric.mod.json   { id, version, name }
//!   quilt.mod.json    { quilt_loader: { id, version, metadata: { name } } }
//! ```
//!
//! Quilt accepts either file, Quilt's own first. Raw line breaks are
//! stripped before parsing since some mods ship them inside strings.


use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{ModmanResult, StoreError};
use crate::model::Loader;

/// Identity of a mod as declared by its own manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModManifest {
    pub id: String,
    pub version: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct FabricManifest {
    id: String,
    version: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuiltManifest {
    quilt_loader: QuiltLoaderSection,
}

#[derive(Debug, Deserialize)]
struct QuiltLoaderSection {
    id: String,
    version: String,
    #[serde(default)]
    metadata: Option<QuiltMetadata>,
}

#[derive(Debug, Deserialize)]
struct QuiltMetadata {
    #[serde(default)]
    name: Option<String>,
}

fn parse(file_name: &str, raw: &str) -> Result<ModManifest, String> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    if file_name == "quilt.mod.json" {
        let manifest: QuiltManifest = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
        let section = manifest.quilt_loader;
        let name = section
            .metadata
            .and_then(|m| m.name)
            .unwrap_or_else(|| section.id.clone());
        Ok(ModManifest {
            id: section.id,
            version: section.version,
            name,
        })
    } else {
        let manifest: FabricManifest = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
        Ok(ModManifest {
            name: manifest.name.unwrap_or_else(|| manifest.id.clone()),
            id: manifest.id,
            version: manifest.version,
        })
    }
}

fn read_manifest(path: &Path, loader: Loader) -> Result<ModManifest, String> {
    let file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| format!("not a jar: {e}"))?;

    for &name in loader.manifest_files() {
        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => continue,
            Err(e) => return Err(e.to_string()),
        };
        let mut raw = String::new();
        entry.read_to_string(&mut raw).map_err(|e| e.to_string())?;
        return parse(name, &raw);
    }

    Err(format!("no {} found", loader.manifest_files().join(" or ")))
}

/// Inspects the jar at `path` on the blocking pool.
///
/// # Errors
///
/// Returns `StoreError::ManifestInvalid` for anything that is not a
/// readable mod for `loader`.
pub async fn inspect(path: impl Into<PathBuf>, loader: Loader) -> ModmanResult<ModManifest> {
    let path = path.into();
    let target = path.clone();
    let result = tokio::task::spawn_blocking(move || read_manifest(&target, loader))
        .await
        .unwrap_or_else(|e| Err(e.to_string()));

    result.map_err(|reason| {
        StoreError::ManifestInvalid {
            path: path.display().to_string(),
            loader: loader.to_string(),
            reason,
        }
        .into()
    })
}
