use tracing::trace;

use crate::core::Result;
use crate::error::FsError;
use crate::vfs::{NodeId, Tree};

/// Turns `path` into a node id without touching the tree.
///
/// * Absolute paths start at the root, relative ones at `start`.
/// * Empty segments and `.` are skipped; `..` moves to the parent and is a no-op at the root.
/// * Any other segment must name a child of the directory reached so far.
///
/// # Errors
/// * `NotADirectory` - a segment tries to descend through a file.
/// * `PathNotFound` - a segment names a missing child.
pub fn resolve(tree: &Tree, start: NodeId, path: &str) -> Result<NodeId> {
    let mut current = if path.starts_with('/') {
        tree.root()
    } else {
        start
    };

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment {
            "." => {}
            ".." => {
                if let Some(parent) = tree.node(current).parent() {
                    current = parent;
                }
            }
            name => {
                let children = tree
                    .node(current)
                    .as_dir()
                    .ok_or_else(|| FsError::NotADirectory(path.to_string()))?;
                current = *children
                    .get(name)
                    .ok_or_else(|| FsError::PathNotFound(path.to_string()))?;
            }
        }
        trace!(segment, at = %tree.path(current), "resolved segment");
    }

    Ok(current)
}
