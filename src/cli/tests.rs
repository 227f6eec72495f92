// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::model::Loader;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["modman", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_aliases() {
    let cli = Cli::try_parse_from(["modman", "ls"]).unwrap();
    assert!(matches!(cli.command, Some(Command::List)));

    let cli = Cli::try_parse_from(["modman", "rm", "old", "-y"]).unwrap();
    let Some(Command::Remove(args)) = cli.command else {
        panic!("expected remove");
    };
    assert_eq!(args.name, "old");
    assert!(args.yes);
}

#[test]
fn test_parse_make() {
    let cli = Cli::try_parse_from(["modman", "make", "Survival", "1.20.1", "--loader", "quilt"]).unwrap();
    let Some(Command::Make(args)) = cli.command else {
        panic!("expected make");
    };
    assert_eq!(args.name, "Survival");
    assert_eq!(args.version.as_deref(), Some("1.20.1"));
    assert_eq!(args.loader, Some(Loader::Quilt));

    let cli = Cli::try_parse_from(["modman", "make", "Latest"]).unwrap();
    let Some(Command::Make(args)) = cli.command else {
        panic!("expected make");
    };
    assert!(args.version.is_none());
    assert!(args.loader.is_none());

    assert!(Cli::try_parse_from(["modman", "make", "x", "1.20.1", "--loader", "forge"]).is_err());
}

#[test]
fn test_parse_install() {
    let cli = Cli::try_parse_from(["modman", "install", "-c", "jei", "238222", "-y"]).unwrap();
    let Some(Command::Install(args)) = cli.command else {
        panic!("expected install");
    };
    assert_eq!(args.mods, ["jei", "238222"]);
    assert!(args.curseforge);
    assert!(args.yes);

    assert!(Cli::try_parse_from(["modman", "install"]).is_err());
}

#[test]
fn test_parse_uninstall_force() {
    let cli = Cli::try_parse_from(["modman", "uninstall", "Fabric API", "--force"]).unwrap();
    let Some(Command::Uninstall(args)) = cli.command else {
        panic!("expected uninstall");
    };
    assert_eq!(args.mods, ["Fabric API"]);
    assert!(args.force);
}

#[test]
fn test_global_options_to_overrides() {
    let cli = Cli::try_parse_from([
        "modman",
        "-l",
        "4",
        "--minecraft",
        "/games/mc",
        "--set",
        "loaders/default=quilt",
        "update",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Command::Update)));
    insta::assert_snapshot!(cli.global.to_config_overrides().join("\n"), @r"
    loaders/default=quilt
    global/output_log_level=4
    global/file_log_level=4
    paths/minecraft=/games/mc
    ");
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["modman", "-l", "7", "list"]).is_err());
}
