//! pkgfile CLI - build package manifests from an editing session
//!
//! Usage: pkgfile [OPTIONS] <COMMAND>
//!
//! Commands:
//!   info        Show the package identity and release defaults
//!   files       List the package files
//!   set         Submit a page value
//!   build       Assemble and write the manifest

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use pkgfile_frontend::domain::entities::FileFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        if !cli.json {
            eprintln!("Error: {:#}", e);
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut frontend = commands::open(cli)?;
    let frontend = &mut frontend;
    let json = cli.json;

    match &cli.command {
        Commands::Info => commands::cmd_info(frontend, json),
        Commands::Maintainers { role } => commands::cmd_maintainers(frontend, role.as_deref(), json),
        Commands::AddMaintainer {
            role,
            handle,
            name,
            email,
            inactive,
        } => commands::cmd_add_maintainer(frontend, role, handle, name, email, !inactive, json),
        Commands::RemoveMaintainer { handle } => {
            commands::cmd_remove_maintainer(frontend, handle, json)
        }
        Commands::Files {
            ignored,
            all,
            generator,
        } => {
            let filter = match (ignored, all) {
                (true, _) => FileFilter::Ignored,
                (_, true) => FileFilter::All,
                _ => FileFilter::Selected,
            };
            commands::cmd_files(frontend, filter, generator.as_deref(), json)
        }
        Commands::Roles => commands::cmd_roles(frontend, json),
        Commands::Deps => commands::cmd_deps(frontend, json),
        Commands::Set { page, field, value } => {
            commands::cmd_set(frontend, page, field, value, json)
        }
        Commands::Preference { name, value, save } => {
            commands::cmd_preference(frontend, cli, name, value.as_deref(), *save)
        }
        Commands::Build { preview, export_v1 } => {
            commands::cmd_build(frontend, *preview, *export_v1, json)
        }
        Commands::Reset => commands::cmd_reset(frontend, json),
    }
}
