//! Injectable transforms consumed by host integrations
//!
//! Two extension points exist: post-processing a computed download link, and
//! choosing the notice dismissal timeout for a given source.

use crate::config::settings::Settings;
use crate::core::types::Dependency;

pub const DEFAULT_DISMISS_DAYS: u32 = 7;

pub type DownloadLinkFilter = Box<dyn Fn(Option<String>, &Dependency) -> Option<String>>;
pub type DismissTimeoutFilter = Box<dyn Fn(u32, &str) -> u32>;

pub struct Filters {
    default_dismiss_days: u32,
    download_link: Option<DownloadLinkFilter>,
    dismiss_timeout: Option<DismissTimeoutFilter>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            default_dismiss_days: DEFAULT_DISMISS_DAYS,
            download_link: None,
            dismiss_timeout: None,
        }
    }
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-source timeouts from the settings file, on top of its default.
    pub fn from_settings(settings: &Settings) -> Self {
        let overrides = settings.dismiss_timeouts.clone();
        let filters = Self {
            default_dismiss_days: settings.dismiss_days,
            ..Self::default()
        };

        if overrides.is_empty() {
            return filters;
        }

        filters.with_dismiss_timeout(move |days, source| {
            overrides.get(source).copied().unwrap_or(days)
        })
    }

    pub fn with_download_link(
        mut self,
        filter: impl Fn(Option<String>, &Dependency) -> Option<String> + 'static,
    ) -> Self {
        self.download_link = Some(Box::new(filter));
        self
    }

    pub fn with_dismiss_timeout(mut self, filter: impl Fn(u32, &str) -> u32 + 'static) -> Self {
        self.dismiss_timeout = Some(Box::new(filter));
        self
    }

    pub fn apply_download_link(&self, link: Option<String>, dependency: &Dependency) -> Option<String> {
        match &self.download_link {
            Some(filter) => filter(link, dependency),
            None => link,
        }
    }

    pub fn dismiss_days(&self, source: &str) -> u32 {
        match &self.dismiss_timeout {
            Some(filter) => filter(self.default_dismiss_days, source),
            None => self.default_dismiss_days,
        }
    }
}
