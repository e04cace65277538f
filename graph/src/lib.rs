pub mod error;
pub mod git_backend;
pub mod permanent;
pub mod query;
pub mod render;
pub mod visible;

pub use error::GraphError;
pub use git_backend::{CommitDetails, GitWalker, LoadedGraph};
pub use permanent::{
    GraphBuilder, GraphLayout, GraphLayoutBuilder, GraphStats, PermanentCommitsInfo,
    PermanentGraph, PermanentIndex,
};
pub use query::{HeadsFilter, TimeRangeFilter};
pub use render::{GraphRenderer, TextMeasure};
pub use visible::{CommitGraphView, HiddenNodesView};
