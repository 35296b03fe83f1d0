use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pkgfile - build package manifests from an editing session
#[derive(Parser, Debug)]
#[command(name = "pkgfile")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Values set with 'pkgfile set' are kept in the session until 'pkgfile reset'.")]
pub struct Cli {
    /// Package root directory (a manifest path is split into directory and file)
    #[arg(short = 'd', long, global = true)]
    pub package_dir: Option<PathBuf>,

    /// Manifest to import instead of the one in the package root
    #[arg(long, global = true)]
    pub package_file: Option<PathBuf>,

    /// Preferences document (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Directory holding session records
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,

    /// Session id
    #[arg(short, long, global = true, default_value = "default")]
    pub session: String,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the package identity and release defaults
    Info,

    /// List maintainers
    Maintainers {
        /// Only maintainers with this role (lead, developer, contributor, helper)
        #[arg(long)]
        role: Option<String>,
    },

    /// Add or replace a maintainer
    AddMaintainer {
        role: String,
        handle: String,
        name: String,
        email: String,

        /// Mark the maintainer inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Remove a maintainer
    RemoveMaintainer { handle: String },

    /// List the package files
    Files {
        /// Only files marked ignored
        #[arg(long, conflicts_with = "all")]
        ignored: bool,

        /// Selected and ignored files
        #[arg(long)]
        all: bool,

        /// Re-enumerate the package tree with this generator (File, Git)
        #[arg(long)]
        generator: Option<String>,
    },

    /// Show the directory and extension role table
    Roles,

    /// List dependencies
    Deps,

    /// Submit a page value (value is parsed as JSON, else taken as text)
    Set {
        /// Page id or category (page1, package, release, options, ...)
        page: String,
        field: String,
        value: String,
    },

    /// Read or change a preference
    Preference {
        name: String,
        value: Option<String>,

        /// Write the preferences document afterwards
        #[arg(long, requires = "value")]
        save: bool,
    },

    /// Assemble and write the manifest
    Build {
        /// Render to stdout without writing anything
        #[arg(long)]
        preview: bool,

        /// Also write a manifest for legacy consumers
        #[arg(long)]
        export_v1: bool,
    },

    /// Drop the session record
    Reset,
}
