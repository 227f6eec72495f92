// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        setup / instance / package
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config --> context      |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               sync        store    state
//!          install/update  instances  JSON + lock
//!           migrate/cascade   |
//!                 |        +--+------+---------+
//!                 v        v         v         v
//!             registry   manifest  launcher  loader
//!         modrinth/cf     zip jar  profiles  fabric/quilt
//!            matcher
//!
//!   +-----------------------------------------+
//!   |  net   shared client, downloads, JSON   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod error;
pub mod launcher;
pub mod loader;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod net;
pub mod registry;
pub mod state;
pub mod store;
pub mod sync;
pub mod utility;
