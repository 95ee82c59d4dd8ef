//! Dependency lifecycle controller
//!
//! Drives each registered dependency through
//! `NotInstalled -> InstalledInactive -> Active`. Required dependencies are
//! installed and activated automatically; optional ones only get a notice
//! offering the next step. Every outcome is reported as a [`Notice`]; one
//! dependency failing never stops evaluation of the others.

use crate::core::manifest::LoadedManifest;
use crate::core::registry::Registry;
use crate::core::resolver::{self, Resolver};
use crate::core::types::{Action, Dependency, Notice, NoticeAction, NoticeStatus, PluginState, slug_dir};
use crate::error::WpdiError;
use crate::project_identity::DISMISS_KEY_PREFIX;
use crate::traits::AppContext;
use crate::ui;
use crate::utils::sanitize::validate_slug;

/// Result of one evaluation pass.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub notices: Vec<Notice>,
    /// Required and active: removal/deactivation affordances are hidden
    pub protected: Vec<String>,
}

pub struct Controller<'a> {
    ctx: &'a AppContext,
    registry: Registry,
}

impl<'a> Controller<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn register(&mut self, declarations: Vec<Dependency>, source: &str) {
        self.registry.register(declarations, source);
    }

    pub fn register_manifest(&mut self, manifest: LoadedManifest) {
        ui::verbose(&format!(
            "Registering {} dependencies from {}",
            manifest.dependencies.len(),
            manifest.source
        ));
        self.registry
            .register(manifest.dependencies, &manifest.source);
    }

    /// Attach a download link to every registered dependency.
    pub fn resolve_all(&mut self) {
        let resolver = Resolver::from_context(self.ctx);
        let links: Vec<(String, Option<String>)> = self
            .registry
            .all()
            .iter()
            .map(|dep| (dep.slug.clone(), resolver.resolve_download_link(dep)))
            .collect();

        for (slug, link) in links {
            self.registry.set_download_link(&slug, link);
        }
    }

    pub fn state_of(&self, slug: &str) -> PluginState {
        if self.ctx.inventory.is_active(slug) {
            PluginState::Active
        } else if self.ctx.inventory.is_installed(slug) {
            PluginState::InstalledInactive
        } else {
            PluginState::NotInstalled
        }
    }

    /// One pass over every registered dependency.
    pub fn evaluate(&mut self) -> Evaluation {
        self.resolve_all();

        let mut evaluation = Evaluation::default();
        for dep in self.registry.all() {
            match self.state_of(&dep.slug) {
                PluginState::Active => {
                    if dep.required {
                        evaluation.protected.push(dep.slug.clone());
                    }
                }
                PluginState::InstalledInactive if dep.required => {
                    evaluation.notices.extend(self.activate(&dep.slug));
                }
                PluginState::InstalledInactive => {
                    evaluation.notices.push(Notice::offer(
                        dep,
                        NoticeAction::Activate,
                        format!("Please activate the {} plugin.", dep.name),
                    ));
                }
                PluginState::NotInstalled if dep.required => {
                    evaluation.notices.extend(self.install(&dep.slug));
                }
                PluginState::NotInstalled => {
                    evaluation.notices.push(Notice::offer(
                        dep,
                        NoticeAction::Install,
                        format!("The {} plugin is required.", dep.name),
                    ));
                }
            }
        }

        evaluation
    }

    /// Install a dependency; required ones are activated right after.
    ///
    /// `None` when the plugin is already installed or the user may not
    /// manage plugins.
    pub fn install(&self, slug: &str) -> Option<Notice> {
        if !self.ctx.permissions.can_manage_plugins() {
            ui::verbose(&permission_refusal(Action::Install, slug).to_string());
            return None;
        }

        let dep = match self.registry.get(slug) {
            Some(dep) => dep,
            None => return Some(unknown_dependency(slug)),
        };

        if self.ctx.inventory.is_installed(slug) {
            ui::verbose(&format!("{} is already installed", slug));
            return None;
        }

        let link = match dep
            .download_link
            .clone()
            .or_else(|| Resolver::from_context(self.ctx).resolve_download_link(dep))
        {
            Some(link) => link,
            None => {
                return Some(Notice::error(
                    dep,
                    format!("Unable to resolve a download link for {}.", dep.name),
                ));
            }
        };

        match self.ctx.installer.install(&link, dep.dir_name()) {
            Err(e) => return Some(Notice::error(dep, e.to_string())),
            Ok(None) => return Some(Notice::error(dep, "Download failed.".to_string())),
            Ok(Some(path)) => {
                ui::verbose(&format!("Installed {} into {}", dep.slug, path.display()));
            }
        }

        if let Err(e) = self.ctx.cache.delete(&resolver::cache_key(slug)) {
            ui::verbose(&format!("Could not clear cached link for {}: {}", slug, e));
        }

        if dep.required {
            return match self.activate(slug) {
                Some(notice) if notice.status == NoticeStatus::Error => Some(notice),
                _ => Some(Notice::success(
                    dep,
                    format!("{} has been installed and activated.", dep.name),
                )),
            };
        }

        Some(Notice::success(dep, format!("{} has been installed.", dep.name)))
    }

    /// Activate a dependency, network-wide when running as network admin.
    pub fn activate(&self, slug: &str) -> Option<Notice> {
        if !self.ctx.permissions.can_manage_plugins() {
            ui::verbose(&permission_refusal(Action::Activate, slug).to_string());
            return None;
        }

        let dep = match self.registry.get(slug) {
            Some(dep) => dep,
            None => return Some(unknown_dependency(slug)),
        };

        match self.ctx.activator.activate(slug, self.ctx.network_admin) {
            Ok(()) => Some(Notice::success(
                dep,
                format!("{} has been activated.", dep.name),
            )),
            Err(e) => Some(Notice::error(dep, e.to_string())),
        }
    }

    /// Suppress the notice for `slug` for the source's timeout. Always succeeds.
    pub fn dismiss(&self, slug: &str) -> Notice {
        let source = self
            .registry
            .get(slug)
            .map(|dep| dep.source.clone())
            .unwrap_or_default();
        let days = self.ctx.filters.dismiss_days(&source);

        if let Err(e) = self.ctx.dismissals.dismiss(&dismiss_key(slug, days), days) {
            ui::warning(&format!("Could not record dismissal for {}: {}", slug, e));
        }

        Notice {
            status: NoticeStatus::Success,
            slug: slug.to_string(),
            message: String::new(),
            action: None,
            source,
        }
    }

    pub fn dispatch(&self, action: Action, slug: &str) -> Option<Notice> {
        if let Err(e) = validate_slug(slug) {
            ui::warning(&e.to_string());
            return None;
        }

        match action {
            Action::Install => self.install(slug),
            Action::Activate => self.activate(slug),
            Action::Dismiss => Some(self.dismiss(slug)),
        }
    }

    /// Remote-call entry point. Methods outside the allow-list are ignored
    /// and produce no message.
    pub fn route(&self, method: &str, slug: &str) -> Option<String> {
        let action: Action = method.parse().ok()?;
        Some(
            self.dispatch(action, slug)
                .map(|notice| notice.message)
                .unwrap_or_default(),
        )
    }

    /// Key the dismissal tracker knows this notice by.
    pub fn notice_dismiss_key(&self, notice: &Notice) -> String {
        dismiss_key(&notice.slug, self.ctx.filters.dismiss_days(&notice.source))
    }
}

/// `dependency-installer-{slug dir}-{days}`
pub fn dismiss_key(slug: &str, days: u32) -> String {
    format!("{}-{}-{}", DISMISS_KEY_PREFIX, slug_dir(slug), days)
}

fn permission_refusal(action: Action, slug: &str) -> WpdiError {
    WpdiError::PermissionError(format!("not allowed to {} {}", action, slug))
}

fn unknown_dependency(slug: &str) -> Notice {
    Notice {
        status: NoticeStatus::Error,
        slug: slug.to_string(),
        message: format!("{} is not a registered dependency.", slug),
        action: None,
        source: String::new(),
    }
}
