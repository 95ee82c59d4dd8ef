//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{CacheCommand, Cli, Command};
use crate::commands::{self, SessionOptions};
use crate::core::types::Action;
use crate::error::Result;
use clap::CommandFactory;
use std::path::PathBuf;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Some(Command::Check { plugins }) => commands::check::run(&session_options(args, plugins)),

        Some(Command::List { plugins }) => commands::list::run(&session_options(args, plugins)),

        Some(Command::Action {
            method,
            slug,
            plugins,
        }) => commands::action::route(&session_options(args, plugins), method, slug),

        Some(Command::Install { slug, plugins }) => {
            commands::action::run(&session_options(args, plugins), Action::Install, slug)
        }

        Some(Command::Activate { slug, plugins }) => {
            commands::action::run(&session_options(args, plugins), Action::Activate, slug)
        }

        Some(Command::Dismiss { slug, plugins }) => {
            commands::action::run(&session_options(args, plugins), Action::Dismiss, slug)
        }

        Some(Command::Cache {
            command: CacheCommand::Clear,
        }) => commands::cache::clear(&session_options(args, &[])),

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn session_options(args: &Cli, plugins: &[PathBuf]) -> SessionOptions {
    SessionOptions {
        config: args.global.config.clone(),
        plugins_dir: args.global.plugins_dir.clone(),
        network: args.global.network,
        plugins: plugins.to_vec(),
    }
}
