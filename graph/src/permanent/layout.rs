use tracing::debug;

use crate::permanent::{PermanentGraph, PermanentIndex};

const UNCLAIMED: u32 = u32::MAX;

/// Display-order annotation for the permanent graph.
///
/// Assigns every permanent index a layout index (the lane the node is drawn
/// in) and the head whose walk claimed it. Computed once per permanent graph
/// by [`GraphLayoutBuilder`] and shared read-only by every view; hiding
/// nodes never invalidates it.
#[derive(Debug, Clone)]
pub struct GraphLayout {
    layout_index: Vec<u32>,
    head_of: Vec<PermanentIndex>,
    heads: Vec<PermanentIndex>,
}

impl GraphLayout {
    /// Layout (lane) index of a permanent node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the permanent index range.
    pub fn layout_index(&self, node: PermanentIndex) -> u32 {
        self.layout_index[node as usize]
    }

    /// The head whose walk claimed this node.
    pub fn head_of(&self, node: PermanentIndex) -> PermanentIndex {
        self.head_of[node as usize]
    }

    /// Heads in the order the layout was built from.
    pub fn heads(&self) -> &[PermanentIndex] {
        &self.heads
    }

    pub fn len(&self) -> usize {
        self.layout_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout_index.is_empty()
    }
}

/// Builds a [`GraphLayout`] by walking down from each head in turn.
///
/// The first walk to reach a node claims it. Within a walk the first
/// unclaimed parent continues the current lane; every further unclaimed
/// parent opens a new lane. Nodes unreachable from the given heads are
/// claimed by a scan in index order, so the layout is total.
pub struct GraphLayoutBuilder {
    layout_index: Vec<u32>,
    head_of: Vec<PermanentIndex>,
    next_lane: u32,
}

impl GraphLayoutBuilder {
    pub fn new() -> Self {
        Self {
            layout_index: Vec::new(),
            head_of: Vec::new(),
            next_lane: 0,
        }
    }

    pub fn build(mut self, graph: &PermanentGraph, heads: &[PermanentIndex]) -> GraphLayout {
        let n = graph.node_count();
        self.layout_index = vec![UNCLAIMED; n];
        self.head_of = vec![0; n];

        for &head in heads {
            self.claim_from(graph, head);
        }

        // Orphan branches the head list missed
        for node in 0..n as PermanentIndex {
            self.claim_from(graph, node);
        }

        debug!(
            nodes = n,
            heads = heads.len(),
            lanes = self.next_lane,
            "graph layout built"
        );

        GraphLayout {
            layout_index: self.layout_index,
            head_of: self.head_of,
            heads: heads.to_vec(),
        }
    }

    /// Walk down from `head`, claiming every node no earlier walk reached.
    fn claim_from(&mut self, graph: &PermanentGraph, head: PermanentIndex) {
        if self.layout_index[head as usize] != UNCLAIMED {
            return;
        }
        self.layout_index[head as usize] = self.next_lane;
        self.head_of[head as usize] = head;
        self.next_lane += 1;

        let mut stack = vec![head];
        while let Some(node) = stack.pop() {
            let lane = self.layout_index[node as usize];
            let mut lane_continued = false;

            for &parent in graph.parents(node) {
                if self.layout_index[parent as usize] != UNCLAIMED {
                    continue;
                }
                self.layout_index[parent as usize] = if lane_continued {
                    let fresh = self.next_lane;
                    self.next_lane += 1;
                    fresh
                } else {
                    lane_continued = true;
                    lane
                };
                self.head_of[parent as usize] = head;
                stack.push(parent);
            }
        }
    }
}

impl Default for GraphLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
