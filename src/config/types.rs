// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for modman-rs.
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, RegistriesConfig, LoadersConfig, ProfileConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::model::Loader;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Remote package registries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistriesConfig {
    /// Modrinth API base URL (v2).
    pub modrinth_url: String,
    /// CurseForge core API base URL (v1).
    pub curseforge_url: String,
    /// CurseForge API key, sent as `x-api-key`.
    pub curseforge_key: String,
    /// CurseForge game id for Minecraft.
    pub curseforge_game_id: u32,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            modrinth_url: "https://api.modrinth.com/v2".to_string(),
            curseforge_url: "https://api.curseforge.com/v1".to_string(),
            curseforge_key: String::new(),
            curseforge_game_id: 432,
        }
    }
}

/// Loader metadata endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadersConfig {
    /// Loader used by `make` when `--loader` is not given.
    pub default: Loader,
    /// Fabric meta base URL.
    pub fabric_meta_url: String,
    /// Quilt meta base URL.
    pub quilt_meta_url: String,
    /// Mojang version manifest.
    pub version_manifest_url: String,
}

impl Default for LoadersConfig {
    fn default() -> Self {
        Self {
            default: Loader::Fabric,
            fabric_meta_url: "https://meta.fabricmc.net/v2".to_string(),
            quilt_meta_url: "https://meta.quiltmc.org/v3".to_string(),
            version_manifest_url:
                "https://launchermeta.mojang.com/mc/game/version_manifest_v2.json".to_string(),
        }
    }
}

/// Launcher profile settings applied to every new instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Launcher icon name.
    pub icon: String,
    /// Base JVM arguments; the loader's mods-dir argument is appended.
    pub java_args: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            icon: "Crafting_Table".to_string(),
            java_args: "-Xmx2G -XX:+UnlockExperimentalVMOptions -XX:+UseG1GC \
                        -XX:G1NewSizePercent=20 -XX:G1ReservePercent=20 \
                        -XX:MaxGCPauseMillis=50 -XX:G1HeapRegionSize=32M"
                .to_string(),
        }
    }
}
