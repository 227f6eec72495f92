// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          ModmanError (~24 bytes)
//!                   |
//!   +--------+------+-----+------+-----------+
//!   |        |            |      |           |
//!   v        v            v      v           v
//! Registry  Store        Net    Cfg    Fs/Io/Other
//!   Box      Box         Box    Box        Box
//!
//! Sub-errors:
//!   Registry  NotFound, NoMatchingVersion
//!   Store     DuplicateInstance, InstanceNotFound, AlreadyInstalled,
//!             ManifestInvalid, RequiredBy, NoActiveInstance, NotInitialized
//!   Network   Reqwest, HttpError, DownloadFailed (transport, never rewritten)
//!   Config    ParseError, MissingKey, InvalidValue
//!   Fs        NotFound, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ModmanError`].
pub type ModmanResult<T> = std::result::Result<T, ModmanError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ModmanError {
    /// A registry could not produce a package record.
    #[error("registry error: {0}")]
    Registry(#[from] Box<RegistryError>),

    /// An instance or package-set invariant was violated.
    #[error("{0}")]
    Store(#[from] Box<StoreError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl ModmanError {
    /// The project, slug or instance does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Registry(e) => matches!(**e, RegistryError::NotFound { .. }),
            Self::Store(e) => matches!(**e, StoreError::InstanceNotFound { .. }),
            _ => false,
        }
    }

    /// The project exists but has no file for the requested loader/version.
    #[must_use]
    pub fn is_no_matching_version(&self) -> bool {
        matches!(self, Self::Registry(e) if matches!(**e, RegistryError::NoMatchingVersion { .. }))
    }

    /// The project is already present in the instance.
    #[must_use]
    pub fn is_already_installed(&self) -> bool {
        matches!(self, Self::Store(e) if matches!(**e, StoreError::AlreadyInstalled { .. }))
    }

    /// Network or HTTP failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ModmanError {
                fn from(err: $error) -> Self {
                    ModmanError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    RegistryError => Registry,
    StoreError => Store,
    NetworkError => Network,
    ConfigError => Config,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Registry Errors ---

/// Errors produced while resolving a package against a registry.
///
/// Transport failures are not represented here; they stay [`NetworkError`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No project matches the slug or id.
    #[error("no project found on {platform} for '{query}'")]
    NotFound { platform: String, query: String },

    /// The project has no file for the loader/game version pair.
    #[error("{project} has no {loader} release for minecraft {game_version}")]
    NoMatchingVersion {
        project: String,
        loader: String,
        game_version: String,
    },

    /// Search returned no usable hit.
    #[error("no {loader} mod found for '{query}'")]
    NoSearchHit { query: String, loader: String },
}

// --- Store Errors ---

/// Instance store and package-set errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An instance with the same (case-insensitive) name exists.
    #[error("instance '{name}' already exists")]
    DuplicateInstance { name: String },

    /// No instance with that name.
    #[error("instance '{name}' not found")]
    InstanceNotFound { name: String },

    /// No instance is marked active.
    #[error("no active instance (use `modman use <name>` or `modman make <name>`)")]
    NoActiveInstance,

    /// The project is already part of the instance.
    #[error("{name} is already installed")]
    AlreadyInstalled { project_id: String, name: String },

    /// The downloaded artifact is not a mod for the target loader.
    #[error("{path} is not a valid {loader} mod: {reason}")]
    ManifestInvalid {
        path: String,
        loader: String,
        reason: String,
    },

    /// A package filename would place the artifact outside its instance.
    #[error("refusing to place '{filename}' outside the instance directory")]
    UnsafeFilename { filename: String },

    /// Other installed packages require this one.
    #[error("{name} is required by {}", .dependents.join(", "))]
    RequiredBy {
        name: String,
        dependents: Vec<String>,
    },

    /// The state file has not been created yet.
    #[error("modman is not set up at {path} (run `modman init`)")]
    NotInitialized { path: String },

    /// The persisted state could not be decoded.
    #[error("state file {path} is corrupt: {message}")]
    CorruptState { path: String, message: String },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Response body did not match the expected schema.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl NetworkError {
    /// Whether the server answered 404.
    #[must_use]
    pub const fn is_http_not_found(&self) -> bool {
        matches!(self, Self::HttpError { status: 404, .. })
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
