// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   setup, instance, package, config
//!
//! Session::open()  lock + load state
//!   handler mutates session.state
//! Session::save()  one write per command
//! ```

pub mod config;
pub mod instance;
pub mod package;
pub mod setup;


use std::io::Write;

use crate::context::Context;
use crate::error::ModmanResult;
use crate::state::{AppState, StateFile, StateLock};

/// Locked, loaded state for the duration of one command.
pub struct Session {
    file: StateFile,
    _lock: StateLock,
    pub state: AppState,
}

impl Session {
    /// Takes the state lock and loads the state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotInitialized` before `modman init`, or an
    /// error if the state cannot be locked or decoded.
    pub fn open(ctx: &Context) -> ModmanResult<Self> {
        let file = ctx.state_file();
        let lock = file.lock()?;
        let state = file.load()?;
        Ok(Self {
            file,
            _lock: lock,
            state,
        })
    }

    /// Writes the state back.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be written.
    pub fn save(&self) -> ModmanResult<()> {
        self.file.save(&self.state)
    }

    /// The state file next to mutable state, for operations that persist
    /// intermediate steps.
    pub fn split(&mut self) -> (&StateFile, &mut AppState) {
        (&self.file, &mut self.state)
    }
}

/// Asks a yes/no question on the terminal; anything but yes is no.
#[must_use]
pub fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer).is_ok()
        && matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
