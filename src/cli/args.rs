use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wpdi",
    about = "WordPress plugin dependency installer",
    long_about = "Reads wp-dependencies.json manifests shipped by plugins and themes, \
                  installs and activates required plugins, and suggests optional ones",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Plugins directory of the site
    #[arg(long, value_name = "DIR", global = true)]
    pub plugins_dir: Option<PathBuf>,

    /// Act as network admin (activate plugins network-wide)
    #[arg(long, global = true)]
    pub network: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one evaluation pass: install/activate required plugins, show notices
    Check {
        /// Plugin or theme directory whose manifest to load (repeatable)
        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Show registered dependencies and their state
    List {
        /// Plugin or theme directory whose manifest to load (repeatable)
        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Route an action by name (install, activate, dismiss)
    Action {
        /// Action name; anything else is ignored
        method: String,

        /// Plugin slug, e.g. akismet/akismet.php
        slug: String,

        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Install a declared dependency
    Install {
        slug: String,

        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Activate a declared dependency
    Activate {
        slug: String,

        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Hide the notice for a dependency for a while
    Dismiss {
        slug: String,

        #[arg(long = "plugin", value_name = "DIR")]
        plugins: Vec<PathBuf>,
    },

    /// Manage cached download links
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCommand {
    /// Remove every cached download link
    Clear,
}
