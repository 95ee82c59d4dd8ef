//! Download link resolution
//!
//! Turns a dependency declaration into the URL of an installable archive.
//! Every host except `wordpress` is a pure function of the declaration; the
//! `wordpress` host asks the plugin directory for its current link and caches
//! the answer (or the deterministic fallback) for a day.

mod url_builders;

use crate::core::filters::Filters;
use crate::core::types::{Dependency, Host};
use crate::error::WpdiError;
use crate::project_identity;
use crate::traits::{AppContext, CacheStore, DirectoryLookup};
use crate::ui;
use crate::utils::sanitize::redact_token;
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// How long a looked-up `wordpress` link is reused.
pub const DOWNLOAD_LINK_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const CACHE_KEY_PREFIX: &str = "wpdi_link_";

pub struct Resolver<'a> {
    lookup: &'a dyn DirectoryLookup,
    cache: &'a dyn CacheStore,
    filters: &'a Filters,
}

impl<'a> Resolver<'a> {
    pub fn new(
        lookup: &'a dyn DirectoryLookup,
        cache: &'a dyn CacheStore,
        filters: &'a Filters,
    ) -> Self {
        Self {
            lookup,
            cache,
            filters,
        }
    }

    pub fn from_context(ctx: &'a AppContext) -> Self {
        Self::new(ctx.lookup.as_ref(), ctx.cache.as_ref(), &ctx.filters)
    }

    /// Compute the download link for `dependency`, after the link filter.
    ///
    /// `None` means no link could be synthesized.
    pub fn resolve_download_link(&self, dependency: &Dependency) -> Option<String> {
        let link = match dependency.host {
            Host::Wordpress => Some(self.resolve_wordpress(dependency)),
            _ => url_builders::build_download_link(dependency),
        };

        match &link {
            Some(url) => ui::verbose(&format!(
                "{} -> {}",
                dependency.slug,
                redact_token(url, dependency.token.as_deref())
            )),
            None => ui::verbose(&resolution_error(dependency).to_string()),
        }

        self.filters.apply_download_link(link, dependency)
    }

    fn resolve_wordpress(&self, dependency: &Dependency) -> String {
        let key = cache_key(&dependency.slug);
        if let Some(cached) = self.cache.get(&key) {
            ui::verbose(&format!("Using cached download link for {}", dependency.slug));
            return cached;
        }

        let plugin_slug = url_builders::wordpress_plugin_slug(dependency);
        let link = self
            .lookup
            .fetch_latest_download_link(&plugin_slug)
            .filter(|link| Url::parse(link).is_ok())
            .unwrap_or_else(|| {
                ui::verbose(&format!(
                    "Plugin directory lookup gave nothing for '{}', using fallback",
                    plugin_slug
                ));
                project_identity::wordpress_fallback_download(&plugin_slug)
            });

        if let Err(e) = self.cache.set(&key, &link, DOWNLOAD_LINK_TTL) {
            ui::warning(&format!("Could not cache download link: {}", e));
        }

        link
    }
}

/// Cache key for a dependency's download link, derived from its slug.
pub fn cache_key(slug: &str) -> String {
    let digest = Sha256::digest(slug.as_bytes());
    let hex = hex::encode(digest);
    format!("{}{}", CACHE_KEY_PREFIX, &hex[..16])
}

pub fn resolution_error(dependency: &Dependency) -> WpdiError {
    WpdiError::ResolutionError(format!(
        "{} ({} host, uri '{}')",
        dependency.name, dependency.host, dependency.uri
    ))
}

#[cfg(test)]
mod tests;
