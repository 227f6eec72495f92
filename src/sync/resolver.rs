// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Required-dependency cascade.
//!
//! ```text
//! expand(parent)
//!   for dep in parent.required:
//!     installed or in flight?  --> skip
//!     resolve on parent's platform, same loader + game version
//!     add as is_dependency     --> expand(dep)   (recursive)
//!     failure                  --> recorded, cascade continues
//! ```
//!
//! The in-flight set holds every project this cascade has started on, so
//! cycles stop at the first repeat even before the record lands.

use futures_util::future::BoxFuture;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::context::Context;
use crate::error::ModmanError;
use crate::model::{Instance, ModData};
use crate::registry::PackageRef;
use crate::store;

/// A dependency that could not be installed.
#[derive(Debug)]
pub struct DependencyFailure {
    /// Name of the package that declared it.
    pub parent: String,
    pub project_id: String,
    pub error: ModmanError,
}

/// State of one cascade run.
#[derive(Debug, Default)]
pub struct Cascade {
    in_flight: HashSet<String>,
    installed: Vec<ModData>,
    failures: Vec<DependencyFailure>,
}

impl Cascade {
    /// Starts a cascade below `root`.
    #[must_use]
    pub fn new(root: &ModData) -> Self {
        Self {
            in_flight: HashSet::from([root.project_id.clone()]),
            ..Self::default()
        }
    }

    /// Consumes the cascade.
    #[must_use]
    pub fn finish(self) -> (Vec<ModData>, Vec<DependencyFailure>) {
        (self.installed, self.failures)
    }

    fn should_skip(&self, instance: &Instance, project_id: &str) -> bool {
        instance.has_package(project_id) || self.in_flight.contains(project_id)
    }

    /// Installs the required dependencies of `parent`, depth first.
    pub fn expand<'a>(
        &'a mut self,
        ctx: &'a Context,
        instance: &'a mut Instance,
        parent: &'a ModData,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            for dep in parent.required_dependencies() {
                if self.should_skip(instance, &dep.project_id) {
                    debug!(parent = %parent.name, dependency = %dep.project_id, "dependency present");
                    continue;
                }
                self.in_flight.insert(dep.project_id.clone());

                let package = PackageRef::for_platform(parent.platform, dep.project_id.clone());
                let resolved = ctx
                    .registries()
                    .resolve(&package, instance.loader, &instance.game_version)
                    .await;

                let outcome = match resolved {
                    Ok(record) if self.is_alias_of_known(instance, &dep.project_id, &record) => {
                        debug!(dependency = %record.name, "dependency present");
                        continue;
                    }
                    Ok(mut record) => {
                        record.is_dependency = true;
                        self.in_flight.insert(record.project_id.clone());
                        store::add_package(instance, record).await
                    }
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(record) => {
                        info!(parent = %parent.name, dependency = %record.name, "installed dependency");
                        self.expand(ctx, instance, &record).await;
                        self.installed.push(record);
                    }
                    Err(e) if e.is_already_installed() => {
                        debug!(dependency = %dep.project_id, "dependency present");
                    }
                    Err(error) => {
                        warn!(
                            parent = %parent.name,
                            dependency = %dep.project_id,
                            %error,
                            "failed to install dependency"
                        );
                        self.failures.push(DependencyFailure {
                            parent: parent.name.clone(),
                            project_id: dep.project_id.clone(),
                            error,
                        });
                    }
                }
            }
        })
    }

    // A slug-style reference may resolve to a project id already handled.
    fn is_alias_of_known(&self, instance: &Instance, requested: &str, record: &ModData) -> bool {
        record.project_id != requested && self.should_skip(instance, &record.project_id)
    }
}
