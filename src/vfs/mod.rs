mod node;
mod resolve;
mod store;
mod tree;

pub use node::{Node, NodeId, NodeType};
pub use resolve::resolve;
pub use store::FileSystemStore;
pub use tree::Tree;
