//! Dependency registry
//!
//! Holds every declaration known to the current run, one per slug, in
//! first-registration order. A required declaration always replaces an
//! optional one for the same slug; otherwise the first declaration wins.

use crate::core::types::Dependency;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Dependency>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge declarations from `source` into the registry.
    pub fn register(&mut self, declarations: Vec<Dependency>, source: &str) {
        for mut dependency in declarations {
            dependency.source = source.to_string();

            match self.index.get(&dependency.slug) {
                None => {
                    self.index
                        .insert(dependency.slug.clone(), self.entries.len());
                    self.entries.push(dependency);
                }
                // Required wins; stays in the slot of the first declaration.
                Some(&pos) if dependency.required => {
                    self.entries[pos] = dependency;
                }
                Some(_) => {}
            }
        }
    }

    pub fn all(&self) -> &[Dependency] {
        &self.entries
    }

    pub fn get(&self, slug: &str) -> Option<&Dependency> {
        self.index.get(slug).map(|&pos| &self.entries[pos])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach the resolver's result; the only in-place mutation allowed.
    pub(crate) fn set_download_link(&mut self, slug: &str, link: Option<String>) {
        if let Some(&pos) = self.index.get(slug) {
            self.entries[pos].download_link = link;
        }
    }
}

#[cfg(test)]
mod tests;
