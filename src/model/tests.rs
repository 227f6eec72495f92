// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DependencyRef, Instance, Loader, ModData, Platform, is_plain_file_name};
use crate::error::StoreError;

fn record(project_id: &str, name: &str, deps: &[(&str, bool)]) -> ModData {
    ModData {
        platform: Platform::Modrinth,
        project_slug: name.to_lowercase(),
        project_id: project_id.to_string(),
        file_id: format!("{project_id}-file"),
        name: name.to_string(),
        resolved_version: String::new(),
        download_url: format!("https://cdn.example/{project_id}.jar"),
        filename: format!("{project_id}.jar"),
        dependencies: deps
            .iter()
            .map(|(id, required)| DependencyRef {
                project_id: (*id).to_string(),
                version_id: None,
                name: (*id).to_string(),
                required: *required,
            })
            .collect(),
        is_dependency: false,
    }
}

#[test]
fn test_push_package_rejects_duplicate_project() {
    let mut instance = Instance::new("main", "1.20.1", Loader::Fabric, "/tmp/main");
    instance.push_package(record("P7dR8mSH", "Fabric API", &[])).unwrap();

    let mut again = record("P7dR8mSH", "Fabric API", &[]);
    again.file_id = "newer".to_string();
    let err = instance.push_package(again).unwrap_err();

    assert!(matches!(err, StoreError::AlreadyInstalled { .. }));
    assert_eq!(instance.packages.len(), 1);
    assert_eq!(instance.packages[0].file_id, "P7dR8mSH-file");
}

#[test]
fn test_dependents_only_count_required() {
    let mut instance = Instance::new("main", "1.20.1", Loader::Fabric, "/tmp/main");
    instance.push_package(record("api", "Fabric API", &[])).unwrap();
    instance
        .push_package(record("sodium", "Sodium", &[("api", true)]))
        .unwrap();
    instance
        .push_package(record("iris", "Iris", &[("api", false), ("sodium", true)]))
        .unwrap();

    let names: Vec<_> = instance
        .dependents_of("api")
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["Sodium"]);
    assert_eq!(instance.dependents_of("sodium").len(), 1);
    assert!(instance.dependents_of("iris").is_empty());
}

#[test]
fn test_lookup_is_case_insensitive() {
    let mut instance = Instance::new("main", "1.20.1", Loader::Fabric, "/tmp/main");
    instance.push_package(record("AANobbMI", "Sodium", &[])).unwrap();

    assert!(instance.lookup("SODIUM").is_some());
    assert!(instance.lookup("sodium").is_some());
    assert!(instance.lookup("AANobbMI").is_some());
    assert!(instance.lookup("lithium").is_none());
}

#[test]
fn test_take_package_and_top_level() {
    let mut instance = Instance::new("main", "1.20.1", Loader::Quilt, "/tmp/main");
    let mut dep = record("api", "QSL", &[]);
    dep.is_dependency = true;
    instance.push_package(dep).unwrap();
    instance
        .push_package(record("a", "A", &[("api", true)]))
        .unwrap();

    let top: Vec<_> = instance.top_level_packages().map(|p| p.project_id.clone()).collect();
    assert_eq!(top, ["a"]);

    assert!(instance.take_package("api").is_some());
    assert!(instance.take_package("api").is_none());
    assert_eq!(instance.packages.len(), 1);
}

#[test]
fn test_loader_strings() {
    assert_eq!("Quilt".parse::<Loader>().unwrap(), Loader::Quilt);
    assert!("forge".parse::<Loader>().is_err());
    insta::assert_snapshot!(
        Loader::Fabric.profile_id("0.15.7", "1.20.1"),
        @"fabric-loader-0.15.7-1.20.1"
    );
    assert_eq!(Loader::Quilt.manifest_files()[0], "quilt.mod.json");
}

#[test]
fn test_record_json_shape() {
    let json = serde_json::to_value(record("AANobbMI", "Sodium", &[("api", true)])).unwrap();
    assert_eq!(json["platform"], "modrinth");
    assert_eq!(json["projectId"], "AANobbMI");
    assert_eq!(json["isDependency"], false);
    assert_eq!(json["dependencies"][0]["required"], true);
    assert!(json["dependencies"][0].get("versionId").is_none());
}

#[test]
fn test_plain_file_names() {
    for ok in ["sodium-0.5.3.jar", "jei 15.2.jar", ".hidden.jar"] {
        assert!(is_plain_file_name(ok), "{ok}");
    }
    for bad in ["", ".", "..", "../x.jar", "mods/x.jar", "/tmp/x.jar", "..\\x.jar", "x.jar/"] {
        assert!(!is_plain_file_name(bad), "{bad}");
    }
}

#[test]
fn test_artifact_path_stays_in_install_dir() {
    let instance = Instance::new("main", "1.20.1", Loader::Fabric, "/games/main");
    let mut rec = record("AANobbMI", "Sodium", &[]);
    assert_eq!(
        instance.artifact_path(&rec).unwrap(),
        std::path::Path::new("/games/main/AANobbMI.jar")
    );

    rec.filename = "/etc/escaped.jar".to_string();
    assert!(matches!(
        instance.artifact_path(&rec),
        Err(StoreError::UnsafeFilename { .. })
    ));
}
