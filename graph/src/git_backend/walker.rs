use anyhow::{Context, Result};
use git2::{Commit, Repository, Sort};
use tracing::debug;

use crate::error::GraphError;
use crate::permanent::{
    GraphBuilder, GraphLayout, GraphLayoutBuilder, PermanentCommitsInfo, PermanentGraph,
    PermanentIndex,
};
use crate::visible::{CommitGraphView, HiddenNodesView};

/// Display-only commit metadata, kept apart from the commit-info store.
#[derive(Debug, Clone)]
pub struct CommitDetails {
    pub author: String,
    pub summary: String,
}

/// One repository load: the permanent graph with everything derived from it.
///
/// All four parts are immutable after the load; a refresh builds a new
/// `LoadedGraph` rather than mutating this one. Views borrow from here and
/// stay cheap.
pub struct LoadedGraph {
    pub graph: PermanentGraph,
    pub commits: PermanentCommitsInfo<String>,
    pub layout: GraphLayout,
    /// Indexed by permanent index, parallel to `commits`.
    pub details: Vec<CommitDetails>,
}

impl LoadedGraph {
    /// A fresh hidden-nodes view with every commit visible.
    pub fn nodes(&self) -> HiddenNodesView<'_> {
        HiddenNodesView::all_visible(&self.graph)
    }

    /// An unfiltered commit-graph view.
    pub fn view(&self) -> CommitGraphView<'_, String> {
        self.view_of(self.nodes())
    }

    /// Wrap an already-filtered hidden-nodes view.
    pub fn view_of<'a>(&'a self, nodes: HiddenNodesView<'a>) -> CommitGraphView<'a, String> {
        CommitGraphView::new(nodes, &self.layout, &self.commits)
    }

    /// Resolve a full or abbreviated commit id to its permanent index.
    pub fn resolve(&self, id: &str) -> Result<PermanentIndex, GraphError> {
        if let Some(node) = self.commits.permanent_index_of(&id.to_string()) {
            return Ok(node);
        }
        (0..self.commits.len() as PermanentIndex)
            .find(|&node| self.commits.commit_id(node).starts_with(id))
            .ok_or_else(|| GraphError::UnknownRef(id.to_string()))
    }
}

pub struct GitWalker {
    repo: Repository,
}

impl GitWalker {
    pub fn new(repo_path: Option<&str>) -> Result<Self> {
        let repo = match repo_path {
            Some(path) => Repository::open(path),
            None => Repository::open_from_env(),
        }
        .context("Failed to open repository")?;

        Ok(Self { repo })
    }

    /// Walk the repository into a permanent graph with commit info, details
    /// and layout. Permanent indices follow the walk order (newest first).
    pub fn load(&self, limit: Option<usize>) -> Result<LoadedGraph> {
        let mut revwalk = self.repo.revwalk()?;

        // Start from HEAD and all branches
        revwalk.push_head()?;
        for branch in self.repo.branches(None)? {
            let (branch, _) = branch?;
            if let Some(target) = branch.get().target() {
                revwalk.push(target)?;
            }
        }

        // Sort by topological order and time
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut builder = GraphBuilder::new();
        let mut timestamps = Vec::new();
        let mut details = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            builder.add_node(
                oid.to_string(),
                commit.parent_ids().map(|parent| parent.to_string()),
            );
            timestamps.push(commit.time().seconds() * 1000);
            details.push(Self::commit_details(&commit));

            if let Some(limit) = limit {
                if timestamps.len() >= limit {
                    break;
                }
            }
        }

        let (graph, ids) = builder.build();
        let commits = PermanentCommitsInfo::new(ids, timestamps)?;

        // Newest head first so the main line claims lane 0
        let mut heads = graph.heads();
        heads.sort_by_key(|&head| std::cmp::Reverse(commits.timestamp(head)));
        let layout = GraphLayoutBuilder::new().build(&graph, &heads);

        debug!(
            commits = graph.node_count(),
            edges = graph.edge_count(),
            "repository loaded"
        );

        Ok(LoadedGraph {
            graph,
            commits,
            layout,
            details,
        })
    }

    fn commit_details(commit: &Commit) -> CommitDetails {
        CommitDetails {
            author: commit.author().name().unwrap_or("Unknown").to_string(),
            summary: commit.summary().unwrap_or("").to_string(),
        }
    }

    /// Branch tips by name.
    pub fn branch_heads(&self) -> Result<Vec<(String, String)>> {
        let mut heads = Vec::new();

        for branch in self.repo.branches(None)? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                if let Some(target) = branch.get().target() {
                    heads.push((name.to_string(), target.to_string()));
                }
            }
        }

        Ok(heads)
    }

    /// Get HEAD commit id
    pub fn head(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(_) => Ok(None),
        }
    }
}
