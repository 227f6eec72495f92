// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the registry adapters and loader metadata.
//!
//! Modrinth, CurseForge, Fabric/Quilt meta and the Mojang manifest are served
//! by wiremock; no test touches the real services.

use modman_rs::config::paths::Layout;
use modman_rs::config::types::{LoadersConfig, RegistriesConfig};
use modman_rs::error::{ModmanError, NetworkError};
use modman_rs::loader::{FABRIC_INSTALLER_JAR, LoaderMeta};
use modman_rs::model::{Loader, Platform};
use modman_rs::registry::{PackageRef, Registries};
use modman_rs::state::AppState;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registries(server: &MockServer) -> Registries {
    Registries::new(&RegistriesConfig {
        modrinth_url: format!("{}/modrinth", server.uri()),
        curseforge_url: format!("{}/curseforge", server.uri()),
        curseforge_key: "test-key".to_string(),
        curseforge_game_id: 432,
    })
}

fn loaders(server: &MockServer) -> LoaderMeta {
    LoaderMeta::new(&LoadersConfig {
        default: Loader::Fabric,
        fabric_meta_url: format!("{}/fabric", server.uri()),
        quilt_meta_url: format!("{}/quilt", server.uri()),
        version_manifest_url: format!("{}/mojang/version_manifest_v2.json", server.uri()),
    })
}

async fn mount_json(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn sodium_project() -> Value {
    json!({ "id": "AANobbMI", "slug": "sodium", "title": "Sodium", "downloads": 5 })
}

fn modrinth_version(id: &str, number: &str, games: &[&str], loaders: &[&str], date: &str) -> Value {
    json!({
        "id": id,
        "version_number": number,
        "game_versions": games,
        "loaders": loaders,
        "date_published": date,
        "files": [
            { "url": format!("https://cdn.example/{id}-sources.jar"), "filename": format!("{id}-sources.jar"), "primary": false },
            { "url": format!("https://cdn.example/{id}.jar"), "filename": format!("sodium-{number}.jar"), "primary": true }
        ],
        "dependencies": [
            { "project_id": "P7dR8mSH", "version_id": null, "dependency_type": "required" },
            { "project_id": "mOgUt4GM", "version_id": null, "dependency_type": "optional" },
            { "project_id": "incompat", "version_id": null, "dependency_type": "incompatible" },
            { "project_id": null, "version_id": "pinned01", "dependency_type": "required" }
        ]
    })
}

// =============================================================================
// Modrinth
// =============================================================================

#[tokio::test]
async fn modrinth_resolve_picks_newest_matching_version() {
    let server = MockServer::start().await;
    mount_json(&server, "/modrinth/project/sodium", sodium_project()).await;
    mount_json(
        &server,
        "/modrinth/project/AANobbMI/version",
        json!([
            modrinth_version("v-quilt", "0.6.0", &["1.20.1"], &["quilt"], "2024-01-01T00:00:00Z"),
            modrinth_version("v-new", "0.5.3", &["1.20.1"], &["fabric", "quilt"], "2023-10-01T00:00:00Z"),
            modrinth_version("v-other", "0.5.9", &["1.20.4"], &["fabric"], "2023-12-01T00:00:00Z"),
            modrinth_version("v-old", "0.5.0", &["1.20.1"], &["fabric"], "2023-06-01T00:00:00Z"),
        ]),
    )
    .await;

    let record = registries(&server)
        .resolve(&PackageRef::parse("sodium", false), Loader::Fabric, "1.20.1")
        .await
        .unwrap();

    assert_eq!(record.platform, Platform::Modrinth);
    assert_eq!(record.project_id, "AANobbMI");
    assert_eq!(record.project_slug, "sodium");
    assert_eq!(record.name, "Sodium");
    assert_eq!(record.file_id, "v-new");
    assert_eq!(record.resolved_version, "0.5.3");
    assert_eq!(record.filename, "sodium-0.5.3.jar");
    assert_eq!(record.download_url, "https://cdn.example/v-new.jar");
    assert!(!record.is_dependency);

    let deps: Vec<(String, bool)> = record
        .dependencies
        .iter()
        .map(|d| (d.project_id.clone(), d.required))
        .collect();
    assert_eq!(
        deps,
        [("P7dR8mSH".to_string(), true), ("mOgUt4GM".to_string(), false)]
    );
}

#[tokio::test]
async fn modrinth_no_matching_version() {
    let server = MockServer::start().await;
    mount_json(&server, "/modrinth/project/sodium", sodium_project()).await;
    mount_json(
        &server,
        "/modrinth/project/AANobbMI/version",
        json!([modrinth_version("v1", "0.5.0", &["1.19.4"], &["fabric"], "2023-06-01T00:00:00Z")]),
    )
    .await;

    let err = registries(&server)
        .resolve(&PackageRef::Modrinth("sodium".to_string()), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();

    assert!(err.is_no_matching_version());
    insta::assert_snapshot!(err.to_string(), @"registry error: Sodium has no fabric release for minecraft 1.20.1");
}

#[tokio::test]
async fn modrinth_not_found_only_on_404() {
    let server = MockServer::start().await;
    mount_status(&server, "/modrinth/project/nope", 404).await;
    mount_status(&server, "/modrinth/project/flaky", 503).await;
    mount_json(&server, "/modrinth/project/sodium", sodium_project()).await;
    mount_status(&server, "/modrinth/project/AANobbMI/version", 404).await;
    let registries = registries(&server);

    let err = registries
        .resolve(&PackageRef::Modrinth("nope".to_string()), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transport());
    insta::assert_snapshot!(err.to_string(), @"registry error: no project found on modrinth for 'nope'");

    let err = registries
        .resolve(&PackageRef::Modrinth("flaky".to_string()), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_not_found());

    // only the project lookup can mean "no such project"
    let err = registries
        .resolve(&PackageRef::Modrinth("sodium".to_string()), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn modrinth_search_requires_loader_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modrinth/search"))
        .and(query_param("query", "sodium extra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                { "slug": "sodium-extra", "categories": ["fabric", "optimization"] },
                { "slug": "other", "categories": ["quilt"] }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/modrinth/search"))
        .and(query_param("query", "forge only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [
                { "slug": "forge-only", "categories": ["forge"] },
                { "slug": "fabric-later", "categories": ["fabric"] }
            ]
        })))
        .mount(&server)
        .await;
    let registries = registries(&server);

    let found = registries.search("sodium extra", Loader::Fabric).await.unwrap();
    assert_eq!(found, PackageRef::Modrinth("sodium-extra".to_string()));

    let err = registries.search("sodium extra", Loader::Quilt).await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"registry error: no quilt mod found for 'sodium extra'");

    assert!(registries.search("forge only", Loader::Fabric).await.is_err());
}

#[tokio::test]
async fn modrinth_identifier_is_one_path_segment() {
    let server = MockServer::start().await;
    mount_json(&server, "/modrinth/project/sodium", sodium_project()).await;
    mount_json(&server, "/modrinth/project/sodium/version", json!([])).await;
    let registries = registries(&server);

    for id in ["sodium/version", "sodium?x=1"] {
        let err = registries
            .resolve(&PackageRef::Modrinth(id.to_string()), Loader::Fabric, "1.20.1")
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{id}: {err}");
    }
}

#[tokio::test]
async fn modrinth_rejects_filenames_with_directories() {
    let server = MockServer::start().await;
    let registries = registries(&server);

    for filename in ["../../escaped.jar", "/tmp/escaped.jar", "mods/escaped.jar", ".."] {
        let mut version =
            modrinth_version("v1", "0.5.0", &["1.20.1"], &["fabric"], "2023-06-01T00:00:00Z");
        version["files"][1]["filename"] = json!(filename);
        server.reset().await;
        mount_json(&server, "/modrinth/project/sodium", sodium_project()).await;
        mount_json(&server, "/modrinth/project/AANobbMI/version", json!([version])).await;

        let err = registries
            .resolve(&PackageRef::parse("sodium", false), Loader::Fabric, "1.20.1")
            .await
            .unwrap_err();
        match err {
            ModmanError::Network(boxed) => {
                assert!(matches!(*boxed, NetworkError::Decode { .. }), "{filename}: {boxed}");
            }
            other => panic!("Expected ModmanError::Network for {filename}, got {other:?}"),
        }
    }
}

// =============================================================================
// CurseForge
// =============================================================================

fn jei_files() -> Value {
    json!({ "data": [
        {
            "id": 1001, "displayName": "jei-1.20.1-forge-15.2.0", "fileName": "jei-forge.jar",
            "fileDate": "2023-12-01T00:00:00.000Z", "downloadUrl": "https://edge.example/jei-forge.jar",
            "gameVersions": ["1.20.1", "Forge"], "dependencies": []
        },
        {
            "id": 1002, "displayName": "jei-1.20.1-fabric-15.0.0", "fileName": "jei-fabric-15.0.0.jar",
            "fileDate": "2023-08-01T00:00:00.000Z", "downloadUrl": "https://edge.example/jei-fabric-15.0.0.jar",
            "gameVersions": ["1.20.1", "Fabric"], "dependencies": []
        },
        {
            "id": 1003, "displayName": "jei-1.20.1-fabric-15.2.0", "fileName": "jei-fabric-15.2.0.jar",
            "fileDate": "2023-11-01T00:00:00.000Z", "downloadUrl": "https://edge.example/jei-fabric-15.2.0.jar",
            "gameVersions": ["1.20.1", "Fabric"],
            "dependencies": [
                { "modId": 306612, "relationType": 3 },
                { "modId": 400000, "relationType": 2 },
                { "modId": 500000, "relationType": 1 },
                { "modId": 500001, "relationType": 4 },
                { "modId": 500002, "relationType": 5 }
            ]
        },
        {
            "id": 1004, "displayName": "jei-1.20.1-fabric-15.3.0", "fileName": "jei-fabric-15.3.0.jar",
            "fileDate": "2024-01-01T00:00:00.000Z", "downloadUrl": null,
            "gameVersions": ["1.20.1", "Fabric"], "dependencies": []
        }
    ]})
}

#[tokio::test]
async fn curseforge_resolve_by_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/curseforge/mods/search"))
        .and(query_param("gameId", "432"))
        .and(query_param("slug", "jei"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "id": 1, "name": "JEI Addon", "slug": "jei-addon" },
            { "id": 238_222, "name": "Just Enough Items (JEI)", "slug": "jei" }
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/curseforge/mods/238222/files"))
        .and(query_param("gameVersion", "1.20.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jei_files()))
        .mount(&server)
        .await;

    let record = registries(&server)
        .resolve(&PackageRef::parse("c:jei", false), Loader::Fabric, "1.20.1")
        .await
        .unwrap();

    assert_eq!(record.platform, Platform::CurseForge);
    assert_eq!(record.project_id, "238222");
    assert_eq!(record.project_slug, "jei");
    // 1004 is newer but has no download url
    assert_eq!(record.file_id, "1003");
    assert_eq!(record.filename, "jei-fabric-15.2.0.jar");
    assert_eq!(record.download_url, "https://edge.example/jei-fabric-15.2.0.jar");
    let deps: Vec<(String, bool)> = record
        .dependencies
        .iter()
        .map(|d| (d.project_id.clone(), d.required))
        .collect();
    assert_eq!(
        deps,
        [("306612".to_string(), true), ("400000".to_string(), false)]
    );
    // embedded, tool and include relations are not dependencies
    assert!(
        record
            .dependencies
            .iter()
            .all(|d| !d.project_id.starts_with("5000"))
    );
}

#[tokio::test]
async fn curseforge_reads_every_page_of_files() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/curseforge/mods/238222",
        json!({ "data": { "id": 238_222, "name": "JEI", "slug": "jei" } }),
    )
    .await;

    let forge: Vec<Value> = (0..50)
        .map(|i| {
            json!({
                "id": 2000 + i, "displayName": format!("jei-forge-{i}"), "fileName": format!("jei-forge-{i}.jar"),
                "fileDate": "2024-02-01T00:00:00.000Z", "downloadUrl": format!("https://edge.example/jei-forge-{i}.jar"),
                "gameVersions": ["1.20.1", "Forge"], "dependencies": []
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/curseforge/mods/238222/files"))
        .and(query_param("gameVersion", "1.20.1"))
        .and(query_param("modLoaderType", "4"))
        .and(query_param("index", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": forge,
            "pagination": { "index": 0, "pageSize": 50, "resultCount": 50, "totalCount": 51 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/curseforge/mods/238222/files"))
        .and(query_param("index", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 3000, "displayName": "jei-fabric", "fileName": "jei-fabric.jar",
                "fileDate": "2023-11-01T00:00:00.000Z", "downloadUrl": "https://edge.example/jei-fabric.jar",
                "gameVersions": ["1.20.1", "Fabric"], "dependencies": []
            }],
            "pagination": { "index": 50, "pageSize": 50, "resultCount": 1, "totalCount": 51 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = registries(&server)
        .resolve(&PackageRef::parse("238222", false), Loader::Fabric, "1.20.1")
        .await
        .unwrap();
    assert_eq!(record.file_id, "3000");
    assert_eq!(record.filename, "jei-fabric.jar");
}

#[tokio::test]
async fn curseforge_resolve_by_numeric_id() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/curseforge/mods/238222",
        json!({ "data": { "id": 238_222, "name": "Just Enough Items (JEI)", "slug": "jei" } }),
    )
    .await;
    mount_json(&server, "/curseforge/mods/238222/files", jei_files()).await;

    let record = registries(&server)
        .resolve(&PackageRef::parse("238222", false), Loader::Fabric, "1.20.1")
        .await
        .unwrap();
    assert_eq!(record.name, "Just Enough Items (JEI)");
    assert_eq!(record.file_id, "1003");
}

#[tokio::test]
async fn curseforge_not_found() {
    let server = MockServer::start().await;
    mount_status(&server, "/curseforge/mods/999", 404).await;
    mount_json(
        &server,
        "/curseforge/mods/search",
        json!({ "data": [{ "id": 1, "name": "JEI Addon", "slug": "jei-addon" }] }),
    )
    .await;
    let registries = registries(&server);

    let err = registries
        .resolve(&PackageRef::parse("999", false), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = registries
        .resolve(&PackageRef::parse("jei", true), Loader::Fabric, "1.20.1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    insta::assert_snapshot!(err.to_string(), @"registry error: no project found on curseforge for 'jei'");
}

// =============================================================================
// Loader metadata
// =============================================================================

#[tokio::test]
async fn loader_latest_versions() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/fabric/versions/loader",
        json!([
            { "version": "0.16.0-beta.1", "stable": false },
            { "version": "0.15.7", "stable": true },
            { "version": "0.15.6", "stable": true }
        ]),
    )
    .await;
    mount_json(
        &server,
        "/quilt/versions/loader",
        json!([{ "version": "0.23.1-beta.2" }, { "version": "0.23.0" }]),
    )
    .await;
    let meta = loaders(&server);

    assert_eq!(meta.latest_version(Loader::Fabric).await.unwrap(), "0.15.7");
    assert_eq!(meta.latest_version(Loader::Quilt).await.unwrap(), "0.23.1-beta.2");
}

#[tokio::test]
async fn loader_empty_listing_is_an_error() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/fabric/versions/loader",
        json!([{ "version": "0.16.0-beta.1", "stable": false }]),
    )
    .await;

    let err = loaders(&server).latest_version(Loader::Fabric).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn loader_game_versions() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/fabric/versions/game",
        json!([{ "version": "1.20.4", "stable": true }, { "version": "1.20.1", "stable": true }]),
    )
    .await;
    mount_json(
        &server,
        "/mojang/version_manifest_v2.json",
        json!({ "latest": { "release": "1.20.4", "snapshot": "24w03a" }, "versions": [] }),
    )
    .await;
    let meta = loaders(&server);

    assert!(meta.supports_game_version(Loader::Fabric, "1.20.1").await.unwrap());
    assert!(!meta.supports_game_version(Loader::Fabric, "1.7.10").await.unwrap());
    assert_eq!(meta.latest_game_version().await.unwrap(), "1.20.4");
}

#[tokio::test]
async fn loader_profile_installed_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fabric/versions/loader/1.20.1/0.15.7/profile/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "fabric-loader-0.15.7-1.20.1" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path(), dir.path().join("modman"));
    let mut state = AppState::new(layout.work_dir());
    let meta = loaders(&server);

    let installed = meta
        .install_profile(&mut state, &layout, Loader::Fabric, "1.20.1", "0.15.7")
        .await
        .unwrap();
    assert!(installed);
    assert!(layout.loader_profile("fabric-loader-0.15.7-1.20.1").is_file());
    assert!(state.installed_loader_versions.contains("fabric-loader-0.15.7-1.20.1"));

    let again = meta
        .install_profile(&mut state, &layout, Loader::Fabric, "1.20.1", "0.15.7")
        .await
        .unwrap();
    assert!(!again);
}

#[tokio::test]
async fn loader_installer_refresh() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/fabric/versions/installer",
        json!([
            { "version": "1.0.1-beta", "stable": false, "url": format!("{}/cdn/beta.jar", server.uri()) },
            { "version": "1.0.0", "stable": true, "url": format!("{}/cdn/installer.jar", server.uri()) }
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/cdn/installer.jar"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"installer".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::new(dir.path(), dir.path().join("modman"));
    let mut state = AppState::new(layout.work_dir());
    let meta = loaders(&server);

    let first = meta.refresh_installer(&mut state, &layout).await.unwrap();
    assert_eq!(first.as_deref(), Some("1.0.0"));
    assert_eq!(state.installer_version.as_deref(), Some("1.0.0"));
    assert_eq!(
        std::fs::read(layout.installers_dir().join(FABRIC_INSTALLER_JAR)).unwrap(),
        b"installer"
    );

    assert!(meta.refresh_installer(&mut state, &layout).await.unwrap().is_none());
}
