// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers for JSON documents and artifacts.
//!
//! ```text
//! write_json_atomic()   temp file in target dir --> rename over target
//! read_json_optional()  missing file --> Ok(None)
//! remove_file_if_exists(), remove_dir_all_if_exists()
//! ```


use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{FsError, ModmanResult};

/// Serializes `value` as pretty JSON and atomically replaces `path`.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns an `FsError` if the temp file cannot be written or renamed.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> ModmanResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| FsError::io(dir, e))?;

    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)
            .map_err(|e| FsError::io(tmp.path(), e.into()))?;
        writer.write_all(b"\n").map_err(|e| FsError::io(tmp.path(), e))?;
        writer.flush().map_err(|e| FsError::io(tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| FsError::io(path, e.error))?;
    Ok(())
}

/// Reads a JSON document, returning `None` when the file does not exist.
///
/// # Errors
///
/// Returns an `FsError` on I/O failure; malformed JSON is reported as an
/// `InvalidData` I/O error on the same path.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> ModmanResult<Option<T>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FsError::io(path, e).into()),
    };
    serde_json::from_slice(&data)
        .map(Some)
        .map_err(|e| FsError::io(path, std::io::Error::new(ErrorKind::InvalidData, e)).into())
}

/// Removes a file; a missing file is not an error.
///
/// # Errors
///
/// Returns an `FsError` on any other I/O failure.
pub fn remove_file_if_exists(path: &Path) -> ModmanResult<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}

/// Removes a directory tree; a missing directory is not an error.
///
/// # Errors
///
/// Returns an `FsError` on any other I/O failure.
pub fn remove_dir_all_if_exists(path: &Path) -> ModmanResult<bool> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}
