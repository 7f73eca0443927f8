//! Call graph accumulated during materialization: which component
//! referenced which, in first-seen order.

use chunkstream_store::ComponentId;
use std::collections::{BTreeSet, HashMap};

/// Parent → ordered children relation over discovered references.
///
/// Children keep first-seen order with duplicates dropped, so output
/// derived from the graph is stable across runs. The graph records the
/// raw reference structure, which may be cyclic even though chunk
/// materialization deduplicates per chunk.
#[derive(Debug, Default, Clone)]
pub struct CallGraph {
    edges: HashMap<ComponentId, Vec<ComponentId>>,
}

impl CallGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent → child`. A no-op when the edge is already known.
    pub fn record(&mut self, parent: &ComponentId, child: &ComponentId) {
        let children = self.edges.entry(parent.clone()).or_default();
        if !children.contains(child) {
            children.push(child.clone());
        }
    }

    /// Children of `parent` in first-seen order.
    #[must_use]
    pub fn children(&self, parent: &ComponentId) -> &[ComponentId] {
        self.edges.get(parent).map_or(&[], Vec::as_slice)
    }

    /// Ids that appear as a parent but never as a child: the starting
    /// points for rendering. Sorted for determinism.
    #[must_use]
    pub fn roots(&self) -> Vec<ComponentId> {
        let parents: BTreeSet<&ComponentId> = self.edges.keys().collect();
        let children: BTreeSet<&ComponentId> = self.edges.values().flatten().collect();
        parents
            .difference(&children)
            .map(|id| (*id).clone())
            .collect()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
