// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   write_json_atomic(), read_json_optional()
//!   remove_file_if_exists(), remove_dir_all_if_exists()
//! ```

pub mod fs;
