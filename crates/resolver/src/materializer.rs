//! Chunk materialization: recursively expand an entry component into a
//! single document by inlining everything it references.

use crate::graph::CallGraph;
use crate::scanner;
use chunkstream_store::{ComponentId, ComponentStore, StoreError};
use std::collections::{HashSet, VecDeque};

/// The materialized output for one root: an ordered line sequence framed
/// by start/end markers, ready to persist or to hand to a summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub root: ComponentId,
    pub lines: Vec<String>,
}

impl Chunk {
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Builds chunks for entry components, accumulating the call graph and
/// the set of entries already produced.
///
/// One materializer is the context for one run: graph and produced set
/// live here, not in process globals, so independent runs never share
/// state. Nested entries discovered mid-expansion are pushed onto a
/// worklist and built as sibling chunks rather than inlined, which also
/// keeps call-stack depth independent of how deeply entries nest.
pub struct Materializer<'a> {
    store: &'a ComponentStore,
    graph: CallGraph,
    produced: HashSet<ComponentId>,
}

impl<'a> Materializer<'a> {
    #[must_use]
    pub fn new(store: &'a ComponentStore) -> Self {
        Self {
            store,
            graph: CallGraph::new(),
            produced: HashSet::new(),
        }
    }

    /// The call graph discovered so far.
    #[must_use]
    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> CallGraph {
        self.graph
    }

    /// Build one chunk per root, plus one per nested entry discovered
    /// along the way. Roots already produced are skipped, so an entry
    /// reached both directly and via nesting yields exactly one chunk.
    pub fn materialize_all(&mut self, roots: &[ComponentId]) -> Vec<Chunk> {
        let mut pending: VecDeque<ComponentId> = roots.iter().cloned().collect();
        let mut chunks = Vec::new();

        while let Some(root) = pending.pop_front() {
            if self.produced.contains(&root) {
                log::info!("Chunk for {root} already produced, skipping");
                continue;
            }
            chunks.push(self.build_chunk(root, &mut pending));
        }
        chunks
    }

    /// Build a single chunk for `root`. Nested entries encountered during
    /// expansion are queued on `pending` instead of being inlined.
    fn build_chunk(&mut self, root: ComponentId, pending: &mut VecDeque<ComponentId>) -> Chunk {
        log::info!("Materializing chunk for {root}");

        let store = self.store;
        let mut visited = HashSet::new();
        visited.insert(root.clone());

        let mut lines = vec![format!("# Start of {}: {root}", root.kind())];
        match store.get(&root) {
            Ok(text) => self.expand(&root, text, &mut visited, pending, &mut lines),
            Err(StoreError::ComponentNotFound(_)) => {
                log::warn!("Root component {root} is missing from the store");
                lines.push(format!("# [Missing component: {root}]"));
            }
            Err(err) => {
                log::warn!("Failed to read root component {root}: {err}");
                lines.push(format!("# [Error loading {root}: {err}]"));
            }
        }
        lines.push(format!("# End of {}: {root}", root.kind()));

        self.produced.insert(root.clone());
        Chunk { root, lines }
    }

    /// Expand one component body into `out`, line by line.
    ///
    /// Non-directive lines pass through unchanged. Each directive either
    /// inlines its target (framed, re-indented), renders a duplicate or
    /// missing marker, or renders a streamed-separately marker for an
    /// entry-type target and queues it as its own root.
    fn expand(
        &mut self,
        current: &ComponentId,
        text: &str,
        visited: &mut HashSet<ComponentId>,
        pending: &mut VecDeque<ComponentId>,
        out: &mut Vec<String>,
    ) {
        let store = self.store;
        let mut occurrences = scanner::scan(text).into_iter().peekable();

        for (line_index, line) in text.lines().enumerate() {
            let occ = match occurrences.next_if(|occ| occ.line_index == line_index) {
                Some(occ) => occ,
                None => {
                    out.push(line.to_string());
                    continue;
                }
            };

            let target = occ.target;
            let indent = occ.indent;
            self.graph.record(current, &target);

            if visited.contains(&target) {
                out.push(format!("{indent}# [Skipped duplicate: {target}]"));
                continue;
            }
            visited.insert(target.clone());

            if target.is_entry() {
                // Entry bodies are never inlined into another chunk.
                out.push(format!("{indent}# [Nested entry {target} streamed separately]"));
                if self.produced.contains(&target) || pending.contains(&target) {
                    log::info!("Nested entry {target} already scheduled, not re-queueing");
                } else {
                    log::info!("Found nested entry {target}, queueing separate chunk");
                    pending.push_back(target);
                }
                continue;
            }

            match store.get(&target) {
                Ok(child_text) => {
                    out.push(format!("{indent}# Start of {target}"));
                    let mut inlined = Vec::new();
                    self.expand(&target, child_text, visited, pending, &mut inlined);
                    out.extend(inlined.into_iter().map(|l| format!("{indent}{l}")));
                    out.push(format!("{indent}# End of {target}"));
                }
                Err(StoreError::ComponentNotFound(_)) => {
                    log::warn!("Could not embed {target}: component not found");
                    out.push(format!("{indent}# [Missing component: {target}]"));
                }
                Err(err) => {
                    log::warn!("Could not embed {target}: {err}");
                    out.push(format!("{indent}# [Error loading {target}: {err}]"));
                }
            }
        }
    }
}
