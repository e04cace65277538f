pub mod walker;

pub use walker::{CommitDetails, GitWalker, LoadedGraph};
