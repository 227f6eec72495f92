// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{add_package, delete, export, read_export, remove_package};
use crate::config::Config;
use crate::context::Context;
use crate::error::{ModmanError, StoreError};
use crate::launcher::LauncherProfile;
use crate::model::{Instance, Loader, ModData, Platform};
use crate::state::AppState;
use chrono::Utc;
use std::path::Path;

fn context(root: &Path) -> Context {
    let mut config = Config::default();
    config.paths.minecraft = Some(root.to_path_buf());
    config.resolve_and_validate().unwrap();
    Context::new(&config).unwrap()
}

fn record(project_id: &str) -> ModData {
    ModData {
        platform: Platform::Modrinth,
        project_slug: project_id.to_string(),
        project_id: project_id.to_string(),
        file_id: format!("{project_id}-v1"),
        name: project_id.to_string(),
        resolved_version: "1.0.0".to_string(),
        // unroutable; these tests never reach the network
        download_url: "http://127.0.0.1:9/unused.jar".to_string(),
        filename: format!("{project_id}.jar"),
        dependencies: Vec::new(),
        is_dependency: false,
    }
}

fn seeded(ctx: &Context, name: &str) -> (AppState, Instance) {
    let mut state = AppState::new(ctx.layout().work_dir());
    let mut instance = Instance::new(name, "1.20.1", Loader::Fabric, ctx.layout().instance_dir(name));
    instance.loader_version = "0.15.7".to_string();
    std::fs::create_dir_all(&instance.install_path).unwrap();
    for id in ["sodium", "lithium"] {
        let rec = record(id);
        std::fs::write(instance.artifact_path(&rec).unwrap(), b"jar").unwrap();
        instance.push_package(rec).unwrap();
    }
    state.insert_instance(instance.clone()).unwrap();
    (state, instance)
}

#[tokio::test]
async fn test_add_existing_project_fails_before_download() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (_, mut instance) = seeded(&ctx, "main");

    let mut newer = record("sodium");
    newer.file_id = "sodium-v2".to_string();
    let err = add_package(&mut instance, newer).await.unwrap_err();

    assert!(err.is_already_installed());
    assert_eq!(instance.packages.len(), 2);
    assert_eq!(instance.find_package("sodium").unwrap().file_id, "sodium-v1");
}

#[tokio::test]
async fn test_add_refuses_filename_outside_instance() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (_, mut instance) = seeded(&ctx, "main");

    let mut escaping = record("iris");
    escaping.filename = "../../escaped.jar".to_string();
    let err = add_package(&mut instance, escaping).await.unwrap_err();

    match err {
        ModmanError::Store(boxed) => {
            assert!(matches!(*boxed, StoreError::UnsafeFilename { .. }));
        }
        other => panic!("Expected ModmanError::Store, got {other:?}"),
    }
    assert!(!instance.has_package("iris"));
    assert!(!ctx.layout().work_dir().join("escaped.jar").exists());
}

#[test]
fn test_remove_never_deletes_outside_instance() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (_, mut instance) = seeded(&ctx, "main");
    let victim = ctx.layout().work_dir().join("victim.jar");
    std::fs::write(&victim, b"keep").unwrap();

    let mut escaping = record("iris");
    escaping.filename = "../../victim.jar".to_string();
    instance.push_package(escaping).unwrap();

    assert!(remove_package(&mut instance, "iris").is_err());
    assert!(victim.exists());
    assert!(instance.has_package("iris"));
}

#[test]
fn test_remove_package_deletes_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (_, mut instance) = seeded(&ctx, "main");
    let jar = instance.install_path.join("sodium.jar");
    assert!(jar.exists());

    let removed = remove_package(&mut instance, "sodium").unwrap();
    assert_eq!(removed.unwrap().project_id, "sodium");
    assert!(!jar.exists());
    assert!(!instance.has_package("sodium"));

    assert!(remove_package(&mut instance, "sodium").unwrap().is_none());
    assert_eq!(instance.packages.len(), 1);
}

#[test]
fn test_delete_removes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (mut state, instance) = seeded(&ctx, "Main");
    state.set_active("main").unwrap();
    ctx.launcher()
        .add(&LauncherProfile::for_instance(&instance, ctx.profile(), Utc::now()))
        .unwrap();

    let removed = delete(&ctx, &mut state, "MAIN").unwrap();
    assert_eq!(removed.name, "Main");
    assert!(!instance.install_path.exists());
    assert!(ctx.launcher().get("Main").unwrap().is_none());
    assert!(state.instances.is_empty());
    assert!(state.active_instance.is_none());

    assert!(delete(&ctx, &mut state, "Main").unwrap_err().is_not_found());
}

#[test]
fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path());
    let (state, instance) = seeded(&ctx, "main");

    let path = export(&ctx, &state, "main").unwrap();
    assert_eq!(path, ctx.layout().exports_dir().join("main.json"));

    let back = read_export(&path).unwrap();
    assert_eq!(back.name, instance.name);
    assert_eq!(back.packages, instance.packages);
    assert_eq!(back.install_path, Path::new(""));

    assert!(read_export(&dir.path().join("nope.json")).is_err());
}
