use crate::error::{Result, StoreError};
use crate::id::{ComponentId, ComponentKind};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Read-only snapshot of a component directory, indexed by normalized id.
///
/// Populated once via [`ComponentStore::load`] (or assembled in memory via
/// [`ComponentStore::from_components`]) and never mutated afterwards, so a
/// run always resolves against a consistent view of the store.
#[derive(Debug, Default, Clone)]
pub struct ComponentStore {
    components: HashMap<ComponentId, String>,
}

impl ComponentStore {
    /// Load every component artifact from a flat directory.
    ///
    /// An unreadable directory aborts the load. Individual files that
    /// cannot be read, or whose names fail the identifier grammar, are
    /// skipped with a warning.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(StoreError::InvalidPath(format!(
                "not a readable directory: {}",
                dir.display()
            )));
        }

        let mut components = HashMap::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.path() == Some(dir) => {
                    // The directory itself could not be read.
                    return Err(StoreError::InvalidPath(format!(
                        "cannot read {}: {err}",
                        dir.display()
                    )));
                }
                Err(err) => {
                    log::warn!("Skipping unreadable entry: {err}");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("txt")
            {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let id = match ComponentId::parse(stem) {
                Ok(id) => id,
                Err(_) => {
                    log::warn!("Skipping {}: not a component identifier", path.display());
                    continue;
                }
            };

            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("Skipping {}: {err}", path.display());
                    continue;
                }
            };

            if components.insert(id.clone(), text).is_some() {
                log::warn!("Duplicate component {id}; keeping the later file");
            }
        }

        log::info!("Loaded {} components from {}", components.len(), dir.display());
        Ok(Self { components })
    }

    /// Build a store from already-parsed components. Primarily for tests
    /// and embedding; runs built this way never touch the filesystem.
    #[must_use]
    pub fn from_components(components: impl IntoIterator<Item = (ComponentId, String)>) -> Self {
        Self {
            components: components.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, id: ComponentId, text: impl Into<String>) {
        self.components.insert(id, text.into());
    }

    /// Component text by normalized id.
    pub fn get(&self, id: &ComponentId) -> Result<&str> {
        self.components
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| StoreError::ComponentNotFound(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// All ids of one type, in no particular order. Callers sort when
    /// they need determinism.
    #[must_use]
    pub fn ids_of_kind(&self, kind: ComponentKind) -> Vec<ComponentId> {
        self.components
            .keys()
            .filter(|id| id.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentId, &str)> {
        self.components.iter().map(|(id, text)| (id, text.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
