// modman-rs: Minecraft Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Context --> Command Dispatch
//!   Init | List | Make | Use | Remove | Install | Uninstall | Lsmod
//!   Update | Migrate | Export | Import | Options | Configs | Version
//! ```

use std::process::ExitCode;

use modman_rs::cli::global::GlobalOptions;
use modman_rs::cli::{self, Command};
use modman_rs::cmd::config::{run_configs_command, run_options_command};
use modman_rs::cmd::instance::{
    run_export_command, run_import_command, run_list_command, run_make_command,
    run_migrate_command, run_remove_command, run_update_command, run_use_command,
};
use modman_rs::cmd::package::{run_install_command, run_lsmod_command, run_uninstall_command};
use modman_rs::cmd::setup::run_init_command;
use modman_rs::config::Config;
use modman_rs::config::loader::ConfigLoader;
use modman_rs::context::Context;
use modman_rs::error::Result;
use modman_rs::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Configs) => {
            return match build_config_loader(&cli.global) {
                Ok(loader) => {
                    run_configs_command(&loader.format_loaded_files());
                    ExitCode::SUCCESS
                }
                Err(e) => report(&e),
            };
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
        Some(_) => {}
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let global = &config.global;
    let log_config = LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> Result<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if matches!(command, Command::Options) {
        run_options_command(config);
        return Ok(());
    }

    let ctx = Context::new(config)?;
    match command {
        Command::Init => run_init_command(&ctx).await,
        Command::List => run_list_command(&ctx),
        Command::Make(args) => run_make_command(args, &ctx, config.loaders.default).await,
        Command::Use(args) => run_use_command(args, &ctx),
        Command::Remove(args) => run_remove_command(args, &ctx),
        Command::Install(args) => run_install_command(args, &ctx).await,
        Command::Uninstall(args) => run_uninstall_command(args, &ctx),
        Command::Lsmod => run_lsmod_command(&ctx),
        Command::Update => run_update_command(&ctx).await,
        Command::Migrate(args) => run_migrate_command(args, &ctx).await,
        Command::Export(args) => run_export_command(args, &ctx),
        Command::Import(args) => run_import_command(args, &ctx).await,
        Command::Version | Command::Options | Command::Configs => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if let Some(user) = Config::user_config_file() {
        loader = loader.add_toml_file_optional(user);
    }
    loader = loader.add_toml_file_optional("modman.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader
        .with_env_prefix("MODMAN")
        .set_all(&global.to_config_overrides())
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
