pub mod commits;
pub mod graph;
pub mod layout;

pub use commits::PermanentCommitsInfo;
pub use graph::{Adjacent, GraphBuilder, GraphStats, PermanentGraph, PermanentIndex};
pub use layout::{GraphLayout, GraphLayoutBuilder};
