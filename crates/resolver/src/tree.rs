//! Renders the discovered call graph as an indented ASCII tree.

use crate::error::Result;
use crate::graph::CallGraph;
use chunkstream_store::ComponentId;
use std::fs;
use std::path::Path;

/// Render the call graph as a box-drawing tree, one subtree per root.
///
/// The walk is depth-first pre-order. The raw graph can be cyclic, so the
/// renderer tracks the current path and emits a `(cycle)` marker instead
/// of descending into a node already on it.
#[must_use]
pub fn render_tree(graph: &CallGraph) -> String {
    let mut lines = Vec::new();
    let mut path = Vec::new();

    for root in graph.roots() {
        lines.push(root.to_string());
        walk(graph, &root, "", &mut path, &mut lines);
    }
    lines.join("\n")
}

fn walk(
    graph: &CallGraph,
    node: &ComponentId,
    prefix: &str,
    path: &mut Vec<ComponentId>,
    lines: &mut Vec<String>,
) {
    path.push(node.clone());

    let children = graph.children(node);
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let connector = if last { "└── " } else { "├── " };

        if path.contains(child) {
            lines.push(format!("{prefix}{connector}{child} (cycle)"));
            continue;
        }

        lines.push(format!("{prefix}{connector}{child}"));
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        walk(graph, child, &child_prefix, path, lines);
    }

    path.pop();
}

/// Render the call graph and persist it to `path`, creating parent
/// directories as needed.
pub fn write_tree_report(graph: &CallGraph, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render_tree(graph))?;
    log::info!("Call tree saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> ComponentId {
        ComponentId::parse(raw).unwrap()
    }

    #[test]
    fn renders_nested_tree() {
        let mut graph = CallGraph::new();
        graph.record(&id("IRN00001"), &id("MRN10001"));
        graph.record(&id("IRN00001"), &id("TRN20002"));
        graph.record(&id("MRN10001"), &id("DRN30003"));

        let expected = "\
IRN00001
├── MRN10001
│   └── DRN30003
└── TRN20002";
        assert_eq!(render_tree(&graph), expected);
    }

    #[test]
    fn renders_each_root_in_sorted_order() {
        let mut graph = CallGraph::new();
        graph.record(&id("IRN00002"), &id("MRN10002"));
        graph.record(&id("IRN00001"), &id("MRN10001"));

        let expected = "\
IRN00001
└── MRN10001
IRN00002
└── MRN10002";
        assert_eq!(render_tree(&graph), expected);
    }

    #[test]
    fn cycle_is_marked_not_followed() {
        let mut graph = CallGraph::new();
        graph.record(&id("IRN00001"), &id("MRN10001"));
        graph.record(&id("MRN10001"), &id("MRN10002"));
        graph.record(&id("MRN10002"), &id("MRN10001"));

        let expected = "\
IRN00001
└── MRN10001
    └── MRN10002
        └── MRN10001 (cycle)";
        assert_eq!(render_tree(&graph), expected);
    }

    #[test]
    fn empty_graph_renders_empty() {
        assert_eq!(render_tree(&CallGraph::new()), "");
    }
}
