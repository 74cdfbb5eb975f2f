//! rDowntime library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::Context;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = Context {
        cfg,
        now: utils::date::resolve_now(cli.at.as_deref())?,
        user: cli.user.as_deref(),
        password: cli.password.as_deref(),
    };

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, &ctx),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, &ctx),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, &ctx),
        Commands::Machine { .. } => cli::commands::machine::handle(&cli.command, &ctx),
        Commands::Start { .. } => cli::commands::start::handle(&cli.command, &ctx),
        Commands::Stop { .. } => cli::commands::stop::handle(&cli.command, &ctx),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, &ctx),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, &ctx),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, &ctx),
        Commands::Periods { .. } => cli::commands::periods::handle(&cli.command, &ctx),
        Commands::Posts { .. } => cli::commands::posts::handle(&cli.command, &ctx),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, &ctx),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, &ctx),
        Commands::Dashboard { .. } => {
            cli::commands::dashboard::handle(&cli.command, &ctx, cli.at.is_some())
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the configured path
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
