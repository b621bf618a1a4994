//! CLI for the pageroute resolution engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pageroute_core::config::{self, RouterConfig};
use pageroute_core::store::SiteDb;
use pageroute_core::RouteError;
use std::path::{Path, PathBuf};

use commands::{
    run_completions, run_import, run_manpage, run_pages, run_redirects, run_remove_page,
    run_resolve,
};

/// Top-level CLI for pageroute.
#[derive(Debug, Parser)]
#[command(name = "pageroute")]
#[command(about = "pageroute: resolve request paths to stored pages and redirects", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/pageroute/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Site database (default: config `database`, then ~/.local/state/pageroute/site.db).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a request path and print the winning page or redirect.
    Resolve {
        /// Request path or absolute URL, e.g. /de/blog/post-1.
        path: String,
        /// Query string, e.g. "lang=de&page=2".
        #[arg(long)]
        query: Option<String>,
        /// Also match unpublished pages.
        #[arg(long)]
        preview: bool,
    },

    /// Import pages and redirects from a TOML seed file.
    Import {
        /// Path to the seed file.
        path: PathBuf,
    },

    /// List stored pages.
    Pages,

    /// List stored redirects.
    Redirects,

    /// Remove every page row with the given identifier.
    RemovePage {
        /// Stored identifier, e.g. /blog/*.
        identifier: String,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page.
    Manpage,
}

/// Exit status for a failed run: 2 when the site database could not be
/// queried, 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RouteError>() {
        Some(route) if route.is_store_failure() => 2,
        _ => 1,
    }
}

fn load_config(path: Option<&Path>) -> Result<RouterConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

async fn open_db(cli_db: Option<&Path>, cfg: &RouterConfig) -> Result<SiteDb> {
    match cli_db.or(cfg.database.as_deref()) {
        Some(p) => SiteDb::open_at(p).await,
        None => SiteDb::open_default().await,
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Commands that need neither config nor database.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);
        let db = open_db(cli.db.as_deref(), &cfg).await?;

        match cli.command {
            CliCommand::Resolve {
                path,
                query,
                preview,
            } => run_resolve(&db, &cfg, &path, query.as_deref(), preview).await?,
            CliCommand::Import { path } => run_import(&db, &path).await?,
            CliCommand::Pages => run_pages(&db).await?,
            CliCommand::Redirects => run_redirects(&db).await?,
            CliCommand::RemovePage { identifier } => run_remove_page(&db, &identifier).await?,
            CliCommand::Completions { .. } | CliCommand::Manpage => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
