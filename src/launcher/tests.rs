// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LauncherProfile, LauncherProfiles};
use crate::config::types::ProfileConfig;
use crate::model::{Instance, Loader};
use chrono::{TimeZone, Utc};

fn profile(name: &str, loader: Loader) -> LauncherProfile {
    let mut instance = Instance::new(name, "1.20.1", loader, format!("/mc/modman/instances/{name}"));
    instance.loader_version = "0.15.7".to_string();
    let settings = ProfileConfig {
        icon: "Crafting_Table".to_string(),
        java_args: "-Xmx2G".to_string(),
    };
    LauncherProfile::for_instance(
        &instance,
        &settings,
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    )
}

#[test]
fn test_profile_fields() {
    let fabric = profile("Survival", Loader::Fabric);
    insta::assert_snapshot!(serde_json::to_string_pretty(&fabric).unwrap(), @r#"
    {
      "name": "Survival",
      "type": "custom",
      "icon": "Crafting_Table",
      "lastVersionId": "fabric-loader-0.15.7-1.20.1",
      "created": "2024-03-01T12:00:00Z",
      "lastUsed": "2024-03-01T12:00:00Z",
      "javaArgs": "-Xmx2G -Dfabric.addMods=/mc/modman/instances/Survival"
    }
    "#);

    let quilt = profile("Q", Loader::Quilt);
    assert!(quilt.java_args.ends_with("-Dloader.modsDir=/mc/modman/instances/Q"));
    assert_eq!(quilt.last_version_id, "quilt-loader-0.15.7-1.20.1");
}

#[test]
fn test_add_creates_document_and_keeps_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("launcher_profiles.json");
    let profiles = LauncherProfiles::new(&path);

    profiles.add(&profile("A", Loader::Fabric)).unwrap();
    assert_eq!(profiles.get("A").unwrap().unwrap().name, "A");

    std::fs::write(
        &path,
        r#"{"profiles":{"vanilla":{"name":"Vanilla","type":"latest-release"}},"settings":{"locale":"en-us"},"version":3}"#,
    )
    .unwrap();
    profiles.add(&profile("B", Loader::Quilt)).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["settings"]["locale"], "en-us");
    assert_eq!(doc["version"], 3);
    assert_eq!(doc["profiles"]["vanilla"]["type"], "latest-release");
    assert_eq!(doc["profiles"]["B"]["type"], "custom");
}

#[test]
fn test_remove_and_set_version() {
    let dir = tempfile::tempdir().unwrap();
    let profiles = LauncherProfiles::new(dir.path().join("launcher_profiles.json"));

    assert!(!profiles.remove("missing").unwrap());

    profiles.add(&profile("A", Loader::Fabric)).unwrap();
    assert!(profiles.set_version("A", "fabric-loader-0.16.0-1.20.1").unwrap());
    assert_eq!(
        profiles.get("A").unwrap().unwrap().last_version_id,
        "fabric-loader-0.16.0-1.20.1"
    );
    assert!(!profiles.set_version("B", "x").unwrap());

    assert!(profiles.remove("A").unwrap());
    assert!(profiles.get("A").unwrap().is_none());
    assert!(!profiles.remove("A").unwrap());
}
