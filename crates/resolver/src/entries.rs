//! Entry detection. An entry is a component of the entry type (`IRN`)
//! that no component in the store references; each one becomes the root
//! of its own chunk.

use crate::scanner;
use chunkstream_store::{ComponentId, ComponentKind, ComponentStore};
use std::collections::BTreeSet;

/// All entry-type ids in the store that are never referenced by any
/// component, sorted for deterministic processing order.
#[must_use]
pub fn detect_entries(store: &ComponentStore) -> Vec<ComponentId> {
    let all: BTreeSet<ComponentId> = store.ids_of_kind(ComponentKind::Irn).into_iter().collect();

    let mut referenced = BTreeSet::new();
    for (_, text) in store.iter() {
        for occ in scanner::scan(text) {
            if occ.target.is_entry() {
                referenced.insert(occ.target);
            }
        }
    }

    all.difference(&referenced).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(parts: &[(&str, &str)]) -> ComponentStore {
        ComponentStore::from_components(
            parts
                .iter()
                .map(|(id, text)| (ComponentId::parse(id).unwrap(), text.to_string())),
        )
    }

    fn id(raw: &str) -> ComponentId {
        ComponentId::parse(raw).unwrap()
    }

    #[test]
    fn unreferenced_entries_are_detected_sorted() {
        let store = store(&[
            ("IRN00003", "c"),
            ("IRN00001", "a"),
            ("MRN10001", "m"),
        ]);
        assert_eq!(detect_entries(&store), vec![id("IRN00001"), id("IRN00003")]);
    }

    #[test]
    fn referenced_entry_is_not_an_entry_point() {
        let store = store(&[
            ("IRN00001", "USE IRN00002"),
            ("IRN00002", "inner"),
        ]);
        assert_eq!(detect_entries(&store), vec![id("IRN00001")]);
    }

    #[test]
    fn entry_referenced_from_non_entry_is_demoted() {
        let store = store(&[
            ("IRN00001", "USE MRN10001"),
            ("MRN10001", "USE IRN00001"),
        ]);
        assert_eq!(detect_entries(&store), vec![]);
    }

    #[test]
    fn non_entry_references_do_not_demote() {
        let store = store(&[
            ("IRN00001", "USE MRN10001\nUSE DRN20001"),
            ("MRN10001", "m"),
        ]);
        assert_eq!(detect_entries(&store), vec![id("IRN00001")]);
    }

    #[test]
    fn entry_referenced_with_suffix_is_demoted() {
        let store = store(&[
            ("IRN00001", "USE IRN00002_report"),
            ("IRN00002", "inner"),
        ]);
        assert_eq!(detect_entries(&store), vec![id("IRN00001")]);
    }
}
