use smallvec::SmallVec;
use std::hash::Hash;

use crate::permanent::{GraphLayout, PermanentCommitsInfo, PermanentIndex};
use crate::visible::HiddenNodesView;

/// Filtered, ordered view of the permanent commit graph enriched with
/// commit identity and timestamps.
///
/// Composes a [`HiddenNodesView`] (owned, one per filtered query) with the
/// shared [`GraphLayout`] and [`PermanentCommitsInfo`]. Purely a read-side
/// translation layer: which permanent node a view slot represents is the
/// hidden-nodes view's concern, what metadata that node carries is the
/// commit-info store's, and this type only composes the two.
pub struct CommitGraphView<'a, CommitId> {
    nodes: HiddenNodesView<'a>,
    layout: &'a GraphLayout,
    commits: &'a PermanentCommitsInfo<CommitId>,
}

impl<'a, CommitId> CommitGraphView<'a, CommitId> {
    /// Compose a view. The layout and commit info must describe the same
    /// permanent graph the hidden-nodes view selects over.
    ///
    /// # Panics
    ///
    /// Panics if the collaborators disagree on the permanent node count.
    pub fn new(
        nodes: HiddenNodesView<'a>,
        layout: &'a GraphLayout,
        commits: &'a PermanentCommitsInfo<CommitId>,
    ) -> Self {
        let n = nodes.graph().node_count();
        assert_eq!(n, layout.len(), "layout does not cover the graph");
        assert_eq!(n, commits.len(), "commit info does not cover the graph");
        Self {
            nodes,
            layout,
            commits,
        }
    }

    /// Number of nodes visible through this view.
    pub fn visible_count(&self) -> usize {
        self.nodes.visible_count()
    }

    /// Permanent index of a view-local node.
    ///
    /// Delegates to the hidden-nodes view; an out-of-range `view_index` is
    /// a caller bug and panics there.
    pub fn permanent_index_of(&self, view_index: usize) -> PermanentIndex {
        self.nodes.permanent_index(view_index)
    }

    /// Commit id of a view-local node. Total for any visible index.
    pub fn commit_id_of(&self, view_index: usize) -> &CommitId {
        self.commits.commit_id(self.permanent_index_of(view_index))
    }

    /// Timestamp of a view-local node, in epoch milliseconds.
    pub fn timestamp_of(&self, view_index: usize) -> i64 {
        self.commits.timestamp(self.permanent_index_of(view_index))
    }

    /// Layout (lane) index of a view-local node.
    pub fn layout_index_of(&self, view_index: usize) -> u32 {
        self.layout.layout_index(self.permanent_index_of(view_index))
    }

    /// View-local indices of the nearest visible ancestors of a node.
    pub fn visible_parents(&self, view_index: usize) -> SmallVec<[usize; 2]> {
        let node = self.permanent_index_of(view_index);
        self.nodes
            .visible_parents(node)
            .iter()
            .filter_map(|&parent| self.nodes.view_index(parent))
            .collect()
    }

    /// The hidden-nodes view this view reads through.
    pub fn nodes(&self) -> &HiddenNodesView<'a> {
        &self.nodes
    }

    /// Hide a permanent node from this view.
    pub fn hide(&mut self, node: PermanentIndex) {
        self.nodes.hide(node);
    }

    /// Show a permanent node in this view.
    pub fn show(&mut self, node: PermanentIndex) {
        self.nodes.show(node);
    }

    /// Keep only visible nodes satisfying the predicate.
    pub fn retain(&mut self, keep: impl FnMut(PermanentIndex) -> bool) {
        self.nodes.retain(keep);
    }
}

impl<'a, CommitId: Clone + Hash + Eq> CommitGraphView<'a, CommitId> {
    /// View-local position of the node carrying a commit id, or `None` if
    /// the commit is unknown or currently hidden.
    pub fn view_index_of_id(&self, id: &CommitId) -> Option<usize> {
        let node = self.commits.permanent_index_of(id)?;
        self.nodes.view_index(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permanent::{GraphBuilder, GraphLayoutBuilder, PermanentGraph};

    // c(0) -> b(1) -> a(2), timestamps 300/200/100
    fn fixture() -> (PermanentGraph, GraphLayout, PermanentCommitsInfo<String>) {
        let mut builder = GraphBuilder::new();
        builder.add_node("c".to_string(), vec!["b".to_string()]);
        builder.add_node("b".to_string(), vec!["a".to_string()]);
        builder.add_node("a".to_string(), vec![]);
        let (graph, ids) = builder.build();

        let layout = GraphLayoutBuilder::new().build(&graph, &graph.heads());
        let commits = PermanentCommitsInfo::new(ids, vec![300, 200, 100]).unwrap();
        (graph, layout, commits)
    }

    #[test]
    fn test_hiding_the_middle_commit() {
        let (graph, layout, commits) = fixture();
        let mut nodes = HiddenNodesView::all_visible(&graph);
        nodes.hide(1);
        let view = CommitGraphView::new(nodes, &layout, &commits);

        assert_eq!(view.visible_count(), 2);
        assert_eq!(view.permanent_index_of(0), 0);
        assert_eq!(view.commit_id_of(0), "c");
        assert_eq!(view.timestamp_of(0), 300);
        assert_eq!(view.permanent_index_of(1), 2);
        assert_eq!(view.commit_id_of(1), "a");
        assert_eq!(view.timestamp_of(1), 100);
    }

    #[test]
    fn test_accessors_agree_with_the_collaborators() {
        let (graph, layout, commits) = fixture();
        let mut nodes = HiddenNodesView::all_visible(&graph);
        nodes.hide(2);
        let view = CommitGraphView::new(nodes, &layout, &commits);

        for v in 0..view.visible_count() {
            let node = view.permanent_index_of(v);
            assert_eq!(view.commit_id_of(v), commits.commit_id(node));
            assert_eq!(view.timestamp_of(v), commits.timestamp(node));
            assert_eq!(view.layout_index_of(v), layout.layout_index(node));
            // idempotent while the hidden set is unchanged
            assert_eq!(view.permanent_index_of(v), node);
        }
    }

    #[test]
    fn test_hidden_set_changes_are_reflected() {
        let (graph, layout, commits) = fixture();
        let mut view =
            CommitGraphView::new(HiddenNodesView::all_visible(&graph), &layout, &commits);

        view.hide(1);
        assert_eq!(view.commit_id_of(1), "a");

        // un-hiding re-queries through the same commit info, no rebuild
        view.show(1);
        assert_eq!(view.visible_count(), 3);
        assert_eq!(view.commit_id_of(1), "b");
        assert_eq!(view.timestamp_of(1), 200);
    }

    #[test]
    fn test_visible_parents_are_view_local() {
        let (graph, layout, commits) = fixture();
        let mut view =
            CommitGraphView::new(HiddenNodesView::all_visible(&graph), &layout, &commits);
        view.hide(1);

        // c's nearest visible ancestor a sits at view index 1
        assert_eq!(view.visible_parents(0), SmallVec::<[usize; 2]>::from_slice(&[1]));
    }

    #[test]
    fn test_view_index_of_id_respects_hiding() {
        let (graph, layout, commits) = fixture();
        let mut view =
            CommitGraphView::new(HiddenNodesView::all_visible(&graph), &layout, &commits);

        assert_eq!(view.view_index_of_id(&"b".to_string()), Some(1));
        view.hide(1);
        assert_eq!(view.view_index_of_id(&"b".to_string()), None);
        assert_eq!(view.view_index_of_id(&"a".to_string()), Some(1));
        assert_eq!(view.view_index_of_id(&"zzz".to_string()), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_view_index_panics() {
        let (graph, layout, commits) = fixture();
        let view =
            CommitGraphView::new(HiddenNodesView::all_visible(&graph), &layout, &commits);

        view.permanent_index_of(3);
    }
}
