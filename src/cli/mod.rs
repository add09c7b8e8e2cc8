//! `swx` command line: server, database, code generation and developer tools.

pub mod db;
pub mod make;
pub mod serve;
pub mod tinker;
pub mod tools;

use crate::config::{validate, Settings};
use crate::logging;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swx", version, about = "swX API command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate, seed and run the HTTP server.
    Serve {
        /// Bind address (default: API_HOST).
        #[arg(long)]
        host: Option<String>,
        /// Port (default: API_PORT).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database management.
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Apply pending migrations (same as `db migrate`).
    Migrate,
    /// Generate application code.
    Make {
        #[command(subcommand)]
        what: MakeWhat,
    },
    /// Interactive SQL console. Statements end with `;` or a blank line.
    Tinker,
    /// Run `cargo fmt`.
    Format,
    /// Run `cargo clippy` with warnings as errors.
    Lint,
}

#[derive(Subcommand, Debug)]
pub enum DbAction {
    /// Wait for the database, migrate, create the superuser and seed translations.
    Setup,
    /// Create the superuser and seed translations (refused in production).
    Seed,
    /// Apply pending migrations.
    Migrate,
    /// Revert applied migrations, newest first.
    Downgrade {
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
    /// Create an empty revision on top of the current head.
    Revision { message: String },
    /// List revisions and whether they are applied.
    Status,
}

#[derive(Args, Debug, Clone)]
pub struct MakeArgs {
    /// Resource name: `product`, `v1/product` or `core/product`.
    pub name: String,
    /// Comma separated `name:type` list (str, text, int, float, bool, datetime, date, uuid, json).
    #[arg(long, default_value = "")]
    pub columns: String,
    /// Also write a migration creating the table (`make resource` only).
    #[arg(long)]
    pub migration: bool,
    /// Project root the generated paths are relative to.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    #[arg(long, env = "MIGRATIONS_DIR", default_value = "migrations")]
    pub migrations_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum MakeWhat {
    Model(MakeArgs),
    /// HTTP handlers.
    Controller(MakeArgs),
    Service(MakeArgs),
    Repository(MakeArgs),
    Route(MakeArgs),
    /// Model, repository, service, handlers and route.
    Resource(MakeArgs),
    /// Migration creating the resource table.
    Migration(MakeArgs),
}

/// `swx make:resource x` -> `swx make resource x`. Only the command position is split.
pub fn expand_colon_syntax<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i == 1 && !arg.starts_with('-') {
            if let Some((group, command)) = arg.split_once(':') {
                out.push(group.to_string());
                out.push(command.to_string());
                continue;
            }
        }
        out.push(arg);
    }
    out
}

fn load_settings() -> anyhow::Result<Settings> {
    let settings = Settings::from_env()?;
    validate(&settings)?;
    Ok(settings)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Make { what } => make::run(what),
        Commands::Format => tools::format(),
        Commands::Lint => tools::lint(),
        command => {
            let settings = load_settings()?;
            let _guard = logging::init_logging(&settings)?;
            match command {
                Commands::Serve { host, port } => serve::run(settings, host, port).await,
                Commands::Db { action } => db::run(settings, action).await,
                Commands::Migrate => db::run(settings, DbAction::Migrate).await,
                Commands::Tinker => tinker::run(settings).await,
                Commands::Make { .. } | Commands::Format | Commands::Lint => Ok(()),
            }
        }
    }
}
