//! Command implementations
//!
//! Every command that touches dependencies runs inside a [`session`]: load
//! settings, build the site context, register the manifests of the callers.

pub mod action;
pub mod cache;
pub mod check;
pub mod completions;
pub mod list;

use crate::config::settings::Settings;
use crate::core::lifecycle::Controller;
use crate::core::manifest;
use crate::error::Result;
use crate::traits::AppContext;
use crate::ui;
use std::path::{Path, PathBuf};

/// Options shared by every dependency command
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: Option<PathBuf>,
    pub plugins_dir: Option<PathBuf>,
    pub network: bool,
    /// Caller directories; empty means discover them in the plugins directory
    pub plugins: Vec<PathBuf>,
}

/// Settings with CLI flags applied on top
pub fn load_settings(options: &SessionOptions) -> Result<Settings> {
    let mut settings = Settings::load(options.config.as_deref())?;

    if let Some(dir) = &options.plugins_dir {
        settings.plugins_dir = dir.clone();
    }
    if options.network {
        settings.network_admin = true;
    }

    if let Some(file) = &settings.source_file {
        ui::verbose(&format!("Using settings from {}", file.display()));
    }
    ui::verbose(&format!("Plugins directory: {}", settings.plugins_dir.display()));

    Ok(settings)
}

pub fn session<T>(
    options: &SessionOptions,
    f: impl FnOnce(&AppContext, &mut Controller<'_>) -> Result<T>,
) -> Result<T> {
    let settings = load_settings(options)?;
    let ctx = AppContext::for_site(&settings)?;
    let mut controller = Controller::new(&ctx);

    register_callers(&mut controller, &settings.plugins_dir, &options.plugins)?;

    f(&ctx, &mut controller)
}

/// Register the manifest of every caller. A malformed manifest is reported
/// and skipped; the other callers still register.
pub fn register_callers(
    controller: &mut Controller<'_>,
    plugins_dir: &Path,
    explicit: &[PathBuf],
) -> Result<usize> {
    let callers = if explicit.is_empty() {
        manifest::discover_callers(plugins_dir)?
    } else {
        explicit.to_vec()
    };

    let mut registered = 0;
    for caller in &callers {
        match manifest::load_manifest(caller) {
            Ok(Some(loaded)) => {
                controller.register_manifest(loaded);
                registered += 1;
            }
            Ok(None) => {
                ui::verbose(&format!("No manifest in {}", caller.display()));
            }
            Err(e) => {
                ui::warning(&format!("Skipping {}: {}", caller.display(), e));
            }
        }
    }

    Ok(registered)
}
