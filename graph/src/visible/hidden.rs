use std::collections::{HashSet, VecDeque};

use crate::permanent::{Adjacent, PermanentGraph, PermanentIndex};

/// Live subset-selection over a borrowed permanent graph.
///
/// Keeps a per-permanent-index visibility mask together with the sorted
/// list of visible indices, so view-local positions translate to permanent
/// indices in O(1) and back in O(log n). Views are cheap and short-lived:
/// one per filtered query, owned by the caller. Mutation goes through
/// `&mut self`, so in-flight reads can never race a hidden-set update.
#[derive(Debug, Clone)]
pub struct HiddenNodesView<'a> {
    graph: &'a PermanentGraph,
    visible_mask: Vec<bool>,
    visible: Vec<PermanentIndex>,
}

impl<'a> HiddenNodesView<'a> {
    /// A view with every node visible.
    pub fn all_visible(graph: &'a PermanentGraph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            visible_mask: vec![true; n],
            visible: (0..n as PermanentIndex).collect(),
        }
    }

    pub fn graph(&self) -> &'a PermanentGraph {
        self.graph
    }

    /// Number of currently visible nodes.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Check visibility of a permanent node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the permanent index range.
    pub fn is_visible(&self, node: PermanentIndex) -> bool {
        self.visible_mask[node as usize]
    }

    /// Translate a view-local index into its permanent index.
    ///
    /// Stable until the hidden set changes.
    ///
    /// # Panics
    ///
    /// Panics if `view_index >= visible_count()`; valid indices are always
    /// derivable from the view's own enumeration.
    pub fn permanent_index(&self, view_index: usize) -> PermanentIndex {
        self.visible[view_index]
    }

    /// Translate a permanent index into its current view-local position,
    /// or `None` while the node is hidden.
    pub fn view_index(&self, node: PermanentIndex) -> Option<usize> {
        if !self.is_visible(node) {
            return None;
        }
        self.visible.binary_search(&node).ok()
    }

    /// Visible permanent indices in view order.
    pub fn iter_visible(&self) -> impl Iterator<Item = PermanentIndex> + '_ {
        self.visible.iter().copied()
    }

    /// Hide a node. Hiding an already-hidden node is a no-op.
    pub fn hide(&mut self, node: PermanentIndex) {
        if !self.visible_mask[node as usize] {
            return;
        }
        self.visible_mask[node as usize] = false;
        if let Ok(pos) = self.visible.binary_search(&node) {
            self.visible.remove(pos);
        }
    }

    /// Show a node. Showing an already-visible node is a no-op.
    pub fn show(&mut self, node: PermanentIndex) {
        if self.visible_mask[node as usize] {
            return;
        }
        self.visible_mask[node as usize] = true;
        if let Err(pos) = self.visible.binary_search(&node) {
            self.visible.insert(pos, node);
        }
    }

    /// Keep only visible nodes satisfying the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(PermanentIndex) -> bool) {
        let mask = &mut self.visible_mask;
        self.visible.retain(|&node| {
            let kept = keep(node);
            if !kept {
                mask[node as usize] = false;
            }
            kept
        });
    }

    /// Nearest visible ancestors of a node, skipping through hidden nodes.
    ///
    /// Keeps filtered views connected: a chain of hidden commits between a
    /// node and its closest visible ancestor collapses into a direct edge.
    pub fn visible_parents(&self, node: PermanentIndex) -> Adjacent {
        let mut found = Adjacent::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<PermanentIndex> =
            self.graph.parents(node).iter().copied().collect();

        while let Some(parent) = queue.pop_front() {
            if !seen.insert(parent) {
                continue;
            }
            if self.is_visible(parent) {
                if !found.contains(&parent) {
                    found.push(parent);
                }
            } else {
                queue.extend(self.graph.parents(parent).iter().copied());
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permanent::GraphBuilder;

    // c4 -> c3 -> c2 -> c1 -> c0
    fn chain() -> PermanentGraph {
        let mut builder = GraphBuilder::new();
        builder.add_node("c4", vec!["c3"]);
        builder.add_node("c3", vec!["c2"]);
        builder.add_node("c2", vec!["c1"]);
        builder.add_node("c1", vec!["c0"]);
        builder.add_node("c0", vec![]);
        builder.build().0
    }

    #[test]
    fn test_all_visible_is_identity() {
        let graph = chain();
        let view = HiddenNodesView::all_visible(&graph);

        assert_eq!(view.visible_count(), 5);
        for v in 0..5 {
            assert_eq!(view.permanent_index(v), v as PermanentIndex);
            assert_eq!(view.view_index(v as PermanentIndex), Some(v));
        }
    }

    #[test]
    fn test_hide_shifts_view_indices() {
        let graph = chain();
        let mut view = HiddenNodesView::all_visible(&graph);

        view.hide(1);
        view.hide(3);

        assert_eq!(view.visible_count(), 3);
        assert_eq!(view.permanent_index(0), 0);
        assert_eq!(view.permanent_index(1), 2);
        assert_eq!(view.permanent_index(2), 4);
        assert_eq!(view.view_index(1), None);
        assert_eq!(view.view_index(4), Some(2));
    }

    #[test]
    fn test_show_restores_the_mapping() {
        let graph = chain();
        let mut view = HiddenNodesView::all_visible(&graph);

        view.hide(2);
        assert_eq!(view.view_index(3), Some(2));

        view.show(2);
        assert_eq!(view.visible_count(), 5);
        assert_eq!(view.view_index(2), Some(2));
        assert_eq!(view.view_index(3), Some(3));
    }

    #[test]
    fn test_hide_and_show_are_idempotent() {
        let graph = chain();
        let mut view = HiddenNodesView::all_visible(&graph);

        view.hide(2);
        view.hide(2);
        assert_eq!(view.visible_count(), 4);

        view.show(2);
        view.show(2);
        assert_eq!(view.visible_count(), 5);
    }

    #[test]
    fn test_visible_parents_skip_hidden_chain() {
        let graph = chain();
        let mut view = HiddenNodesView::all_visible(&graph);

        // hide c3 and c2: c4's nearest visible ancestor becomes c1
        view.hide(1);
        view.hide(2);

        assert_eq!(view.visible_parents(0), Adjacent::from_slice(&[3]));
        // fully hidden ancestry yields no parents
        view.hide(3);
        view.hide(4);
        assert!(view.visible_parents(0).is_empty());
    }

    #[test]
    fn test_visible_parents_of_merge_dedup() {
        // merge(0) -> b1(1), b2(2); both -> base(3)
        let mut builder = GraphBuilder::new();
        builder.add_node("merge", vec!["b1", "b2"]);
        builder.add_node("b1", vec!["base"]);
        builder.add_node("b2", vec!["base"]);
        builder.add_node("base", vec![]);
        let (graph, _) = builder.build();

        let mut view = HiddenNodesView::all_visible(&graph);
        view.hide(1);
        view.hide(2);

        // both hidden branches collapse onto the single visible base
        assert_eq!(view.visible_parents(0), Adjacent::from_slice(&[3]));
    }

    #[test]
    fn test_retain() {
        let graph = chain();
        let mut view = HiddenNodesView::all_visible(&graph);

        view.retain(|node| node % 2 == 0);

        assert_eq!(view.visible_count(), 3);
        assert_eq!(
            view.iter_visible().collect::<Vec<_>>(),
            vec![0, 2, 4]
        );
        assert!(!view.is_visible(1));
    }
}
