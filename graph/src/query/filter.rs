use std::collections::VecDeque;
use tracing::debug;

use crate::error::GraphError;
use crate::permanent::{PermanentCommitsInfo, PermanentIndex};
use crate::visible::HiddenNodesView;

/// Keeps exactly the nodes reachable from a set of heads via parent edges.
///
/// This is branch selection: pick the tips, hide everything their history
/// never reaches. Filters narrow an existing [`HiddenNodesView`] in place,
/// so they compose; the permanent graph is never copied.
pub struct HeadsFilter {
    heads: Vec<PermanentIndex>,
}

impl HeadsFilter {
    pub fn new(heads: Vec<PermanentIndex>) -> Result<Self, GraphError> {
        if heads.is_empty() {
            return Err(GraphError::EmptyHeads);
        }
        Ok(Self { heads })
    }

    pub fn apply(&self, view: &mut HiddenNodesView<'_>) {
        let graph = view.graph();
        let mut reachable = vec![false; graph.node_count()];
        let mut queue: VecDeque<PermanentIndex> = self.heads.iter().copied().collect();

        while let Some(node) = queue.pop_front() {
            if reachable[node as usize] {
                continue;
            }
            reachable[node as usize] = true;
            queue.extend(graph.parents(node).iter().copied());
        }

        let before = view.visible_count();
        view.retain(|node| reachable[node as usize]);
        debug!(
            heads = self.heads.len(),
            hidden = before - view.visible_count(),
            "heads filter applied"
        );
    }
}

/// Keeps nodes whose timestamp lies in an inclusive range.
///
/// Bounds are epoch milliseconds; `None` leaves that side open.
pub struct TimeRangeFilter {
    since: Option<i64>,
    until: Option<i64>,
}

impl TimeRangeFilter {
    pub fn new(since: Option<i64>, until: Option<i64>) -> Self {
        Self { since, until }
    }

    pub fn apply<CommitId>(
        &self,
        view: &mut HiddenNodesView<'_>,
        commits: &PermanentCommitsInfo<CommitId>,
    ) {
        let before = view.visible_count();
        view.retain(|node| {
            let ts = commits.timestamp(node);
            self.since.map_or(true, |since| ts >= since)
                && self.until.map_or(true, |until| ts <= until)
        });
        debug!(
            hidden = before - view.visible_count(),
            "time range filter applied"
        );
    }
}
