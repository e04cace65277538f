pub mod hidden;
pub mod view;

pub use hidden::HiddenNodesView;
pub use view::CommitGraphView;
