use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;

/// Stable identity of a node across all views, assigned once at graph
/// construction and never renumbered.
pub type PermanentIndex = u32;

/// Adjacent node indices; commits rarely have more than two parents.
pub type Adjacent = SmallVec<[PermanentIndex; 2]>;

/// Immutable, full commit graph.
///
/// Nodes form the dense index range `[0, node_count)`. The graph stores
/// adjacency only; commit identity and timestamps live in
/// [`PermanentCommitsInfo`](super::PermanentCommitsInfo), and visibility is
/// layered on top by [`HiddenNodesView`](crate::visible::HiddenNodesView).
/// A repository refresh builds a new graph, it never mutates this one.
#[derive(Debug, Clone)]
pub struct PermanentGraph {
    parents: Vec<Adjacent>,
    children: Vec<Adjacent>,
    edge_count: usize,
}

impl PermanentGraph {
    /// Number of nodes; permanent indices are exactly `[0, node_count)`.
    pub fn node_count(&self) -> usize {
        self.parents.len()
    }

    /// Number of parent edges between loaded nodes.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Parents of a node, in commit order.
    pub fn parents(&self, node: PermanentIndex) -> &[PermanentIndex] {
        &self.parents[node as usize]
    }

    /// Children of a node, in insertion order.
    pub fn children(&self, node: PermanentIndex) -> &[PermanentIndex] {
        &self.children[node as usize]
    }

    /// Check if a node is a root (no parents in the loaded range).
    pub fn is_root(&self, node: PermanentIndex) -> bool {
        self.parents[node as usize].is_empty()
    }

    /// Check if a node is a merge (multiple parents).
    pub fn is_merge(&self, node: PermanentIndex) -> bool {
        self.parents[node as usize].len() > 1
    }

    /// All head nodes (no children), in index order.
    pub fn heads(&self) -> Vec<PermanentIndex> {
        (0..self.node_count() as PermanentIndex)
            .filter(|&n| self.children[n as usize].is_empty())
            .collect()
    }

    /// All root nodes (no parents), in index order.
    pub fn roots(&self) -> Vec<PermanentIndex> {
        (0..self.node_count() as PermanentIndex)
            .filter(|&n| self.is_root(n))
            .collect()
    }

    /// Get statistics about the graph.
    pub fn stats(&self) -> GraphStats {
        let merge_commits = (0..self.node_count() as PermanentIndex)
            .filter(|&n| self.is_merge(n))
            .count();

        GraphStats {
            total_commits: self.node_count(),
            total_edges: self.edge_count,
            merge_commits,
            root_commits: self.roots().len(),
            head_commits: self.heads().len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_commits: usize,
    pub root_commits: usize,
    pub head_commits: usize,
}

/// Builds a [`PermanentGraph`] from externally-identified commits.
///
/// Commits are added newest-first (revwalk order); permanent indices are
/// assigned in insertion order. Parent references are recorded by external
/// id and resolved in [`build`](Self::build); edges to commits that were
/// never added (cut off by a load limit) are dropped.
pub struct GraphBuilder<Id> {
    ids: Vec<Id>,
    raw_parents: Vec<SmallVec<[Id; 2]>>,
    index_of: HashMap<Id, PermanentIndex>,
}

impl<Id: Clone + Hash + Eq> GraphBuilder<Id> {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            raw_parents: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Add a commit and return the permanent index assigned to it.
    pub fn add_node(
        &mut self,
        id: Id,
        parents: impl IntoIterator<Item = Id>,
    ) -> PermanentIndex {
        let index = self.ids.len() as PermanentIndex;
        self.index_of.insert(id.clone(), index);
        self.ids.push(id);
        self.raw_parents.push(parents.into_iter().collect());
        index
    }

    /// Resolve parent ids to permanent indices and freeze the graph.
    ///
    /// Returns the graph together with the commit ids in permanent-index
    /// order, ready to be zipped with timestamps into a commits-info store.
    pub fn build(self) -> (PermanentGraph, Vec<Id>) {
        let n = self.ids.len();
        let mut parents: Vec<Adjacent> = vec![Adjacent::new(); n];
        let mut children: Vec<Adjacent> = vec![Adjacent::new(); n];
        let mut edge_count = 0;

        for (node, raw) in self.raw_parents.iter().enumerate() {
            for parent_id in raw {
                if let Some(&parent) = self.index_of.get(parent_id) {
                    parents[node].push(parent);
                    children[parent as usize].push(node as PermanentIndex);
                    edge_count += 1;
                }
            }
        }

        let graph = PermanentGraph {
            parents,
            children,
            edge_count,
        };
        (graph, self.ids)
    }
}

impl<Id: Clone + Hash + Eq> Default for GraphBuilder<Id> {
    fn default() -> Self {
        Self::new()
    }
}
