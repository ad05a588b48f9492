//! Breadth-first traversal over id-keyed class hierarchies.
//!
//! One helper serves inheritance expansion, abstract-descendant collection
//! and enum-instance gathering; callers supply the children function and an
//! edge callback.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;

/// Walk the subclass tree breadth-first from `seed`, calling `on_edge` once
/// per distinct `(parent, child)` edge, root to leaves.
///
/// A child reachable through several parents is visited once per parent edge
/// (multiple inheritance accumulates), but each edge only once, so cyclic
/// input terminates instead of looping.
pub(crate) fn breadth_first_edges<F, G>(seed: Arc<str>, mut children_of: F, mut on_edge: G)
where
    F: FnMut(&str) -> Vec<Arc<str>>,
    G: FnMut(&str, &str),
{
    let mut queue: VecDeque<Arc<str>> = VecDeque::new();
    let mut seen: FxHashSet<(Arc<str>, Arc<str>)> = FxHashSet::default();
    queue.push_back(seed);

    while let Some(parent) = queue.pop_front() {
        for child in children_of(&parent) {
            if !seen.insert((parent.clone(), child.clone())) {
                continue;
            }
            on_edge(&parent, &child);
            queue.push_back(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn tree(edges: &[(&str, &[&str])]) -> FxHashMap<Arc<str>, Vec<Arc<str>>> {
        edges
            .iter()
            .map(|(p, cs)| {
                (
                    Arc::from(*p),
                    cs.iter().map(|c| Arc::from(*c)).collect::<Vec<Arc<str>>>(),
                )
            })
            .collect()
    }

    fn visit_order(children: &FxHashMap<Arc<str>, Vec<Arc<str>>>, seed: &str) -> Vec<String> {
        let mut order = Vec::new();
        breadth_first_edges(
            Arc::from(seed),
            |id| children.get(id).cloned().unwrap_or_default(),
            |parent, child| order.push(format!("{parent}->{child}")),
        );
        order
    }

    #[test]
    fn test_root_to_leaves_order() {
        let children = tree(&[("root", &["a", "b"]), ("a", &["c"])]);
        assert_eq!(
            visit_order(&children, "root"),
            vec!["root->a", "root->b", "a->c"]
        );
    }

    #[test]
    fn test_diamond_visits_both_edges() {
        let children = tree(&[("root", &["a", "b"]), ("a", &["d"]), ("b", &["d"])]);
        let order = visit_order(&children, "root");
        assert!(order.contains(&"a->d".to_string()));
        assert!(order.contains(&"b->d".to_string()));
    }

    #[test]
    fn test_cycle_terminates() {
        let children = tree(&[("a", &["b"]), ("b", &["a"])]);
        let order = visit_order(&children, "a");
        assert_eq!(order, vec!["a->b", "b->a"]);
    }
}
