//! Slot arena that owns every node of the file system.
//!
//! Directories own their children through the `children` map; the `parent` field of a node
//! is a plain [`NodeId`] and never keeps anything alive. Freed slots are recycled.

use crate::core::Result;
use crate::error::FsError;
use crate::vfs::{Node, NodeId};

#[derive(Debug)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only the root directory `/`.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::directory("/"))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached ones included.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` points to a freed slot. Ids handed out by this tree stay valid until
    /// the subtree holding them is freed.
    pub fn node(&self, id: NodeId) -> &Node {
        self.slots[id.0].as_ref().expect("stale node id")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.0].as_mut().expect("stale node id")
    }

    #[cfg(test)]
    fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Stores a detached node and returns its id.
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Looks up a direct child of `dir` by name. Files have no children.
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir).as_dir()?.get(name).copied()
    }

    /// Attaches the detached node `child` under `dir`.
    ///
    /// This is the only place where a parent link is set. On a name collision nothing changes
    /// and `child` stays detached.
    pub(crate) fn add(&mut self, dir: NodeId, child: NodeId) -> Result<()> {
        let name = self.node(child).name().to_string();
        let Some(children) = self.node_mut(dir).as_dir_mut() else {
            return Err(FsError::NotADirectory(self.path(dir)));
        };
        if children.contains_key(&name) {
            return Err(FsError::NameCollision(name));
        }
        children.insert(name, child);
        self.node_mut(child).set_parent(Some(dir));
        Ok(())
    }

    /// Detaches the child `name` from `dir` and returns it. The subtree stays allocated.
    pub(crate) fn remove(&mut self, dir: NodeId, name: &str) -> Result<NodeId> {
        let removed = self
            .node_mut(dir)
            .as_dir_mut()
            .and_then(|children| children.remove(name))
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        self.node_mut(removed).set_parent(None);
        Ok(removed)
    }

    /// Renames the child `old` of `dir` to `new`, keeping it under `dir`.
    pub(crate) fn rename(&mut self, dir: NodeId, old: &str, new: &str) -> Result<()> {
        let id = self
            .child(dir, old)
            .ok_or_else(|| FsError::NotFound(old.to_string()))?;
        if old == new {
            return Ok(());
        }
        if self.child(dir, new).is_some() {
            return Err(FsError::NameCollision(new.to_string()));
        }
        self.remove(dir, old)?;
        self.node_mut(id).set_name(new.to_string());
        self.add(dir, id)
    }

    /// Replaces the lines of a file node.
    pub(crate) fn set_lines(&mut self, id: NodeId, lines: Vec<String>) -> Result<()> {
        let path = self.path(id);
        let content = self.node_mut(id).as_file_mut().ok_or(FsError::NotAFile(path))?;
        *content = lines;
        Ok(())
    }

    pub(crate) fn extend_lines(&mut self, id: NodeId, lines: Vec<String>) -> Result<()> {
        let path = self.path(id);
        let content = self.node_mut(id).as_file_mut().ok_or(FsError::NotAFile(path))?;
        content.extend(lines);
        Ok(())
    }

    /// Absolute path of `id`, built by walking parent links. The root renders as `/`.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.node(current);
            names.push(node.name());
            match node.parent() {
                Some(parent) => current = parent,
                None => break, // top of a detached subtree
            }
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// True when `ancestor` lies on the parent chain of `id` (or is `id` itself).
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent();
        }
        false
    }

    /// Deep copy of the subtree at `id`. The copy is detached and shares nothing with the
    /// source.
    pub(crate) fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let top_copy = self.node(id).shallow_copy();
        let top = self.insert(top_copy);
        let mut pending = vec![(id, top)];
        while let Some((src, dst)) = pending.pop() {
            let children: Vec<(String, NodeId)> = match self.node(src).as_dir() {
                Some(children) => children.iter().map(|(n, c)| (n.clone(), *c)).collect(),
                None => continue,
            };
            for (name, child) in children {
                let mut copy = self.node(child).shallow_copy();
                copy.set_parent(Some(dst));
                let copy_id = self.insert(copy);
                if let Some(map) = self.node_mut(dst).as_dir_mut() {
                    map.insert(name, copy_id);
                }
                pending.push((child, copy_id));
            }
        }
        top
    }

    /// Releases every slot of the detached subtree at `id`.
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.slots[current.0].take() {
                if let Some(children) = node.as_dir() {
                    pending.extend(children.values().copied());
                }
                self.free.push(current.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_under(tree: &mut Tree, parent: NodeId, name: &str) -> NodeId {
        let id = tree.insert(Node::directory(name));
        tree.add(parent, id).unwrap();
        id
    }

    fn file_under(tree: &mut Tree, parent: NodeId, name: &str, lines: &[&str]) -> NodeId {
        let id = tree.insert(Node::file(name));
        tree.add(parent, id).unwrap();
        tree.set_lines(id, lines.iter().map(|l| l.to_string()).collect())
            .unwrap();
        id
    }

    mod paths {
        use super::*;

        #[test]
        fn test_root_path() {
            let tree = Tree::new();
            assert_eq!(tree.path(tree.root()), "/");
            assert_eq!(tree.len(), 1);
        }

        #[test]
        fn test_nested_path() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            let b = dir_under(&mut tree, a, "b");
            let c = file_under(&mut tree, b, "c", &[]);
            assert_eq!(tree.path(a), "/a");
            assert_eq!(tree.path(b), "/a/b");
            assert_eq!(tree.path(c), "/a/b/c");
        }

        #[test]
        fn test_deep_path_is_iterative() {
            let mut tree = Tree::new();
            let mut current = tree.root();
            for _ in 0..2000 {
                current = dir_under(&mut tree, current, "d");
            }
            let path = tree.path(current);
            assert_eq!(path.matches("/d").count(), 2000);
        }

        #[test]
        fn test_is_ancestor() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            let b = dir_under(&mut tree, a, "b");
            let other = dir_under(&mut tree, root, "other");
            assert!(tree.is_ancestor(root, b));
            assert!(tree.is_ancestor(a, b));
            assert!(tree.is_ancestor(b, b));
            assert!(!tree.is_ancestor(b, a));
            assert!(!tree.is_ancestor(other, b));
        }
    }

    mod add_remove {
        use super::*;

        #[test]
        fn test_add_sets_parent() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            assert_eq!(tree.node(a).parent(), Some(root));
            assert_eq!(tree.child(root, "a"), Some(a));
        }

        #[test]
        fn test_add_collision_keeps_tree() {
            let mut tree = Tree::new();
            let root = tree.root();
            let first = file_under(&mut tree, root, "f", &["1"]);
            let second = tree.insert(Node::file("f"));

            let result = tree.add(root, second);
            assert_eq!(result, Err(FsError::NameCollision("f".to_string())));
            assert_eq!(tree.child(root, "f"), Some(first));
            assert!(tree.node(second).parent().is_none());
        }

        #[test]
        fn test_add_under_file_fails() {
            let mut tree = Tree::new();
            let root = tree.root();
            let f = file_under(&mut tree, root, "f", &[]);
            let x = tree.insert(Node::file("x"));
            assert_eq!(tree.add(f, x), Err(FsError::NotADirectory("/f".to_string())));
        }

        #[test]
        fn test_remove_missing() {
            let mut tree = Tree::new();
            let root = tree.root();
            assert_eq!(
                tree.remove(root, "nope"),
                Err(FsError::NotFound("nope".to_string()))
            );
        }

        #[test]
        fn test_remove_and_free_recycles_slots() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            dir_under(&mut tree, a, "b");
            file_under(&mut tree, a, "f", &["x"]);
            assert_eq!(tree.len(), 4);

            let removed = tree.remove(root, "a").unwrap();
            assert_eq!(removed, a);
            assert!(tree.child(root, "a").is_none());
            tree.free_subtree(removed);
            assert_eq!(tree.len(), 1);
            assert!(!tree.contains(a));

            let reused = tree.insert(Node::file("g"));
            assert!(reused.0 < 4);
        }

        #[test]
        fn test_rename() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = file_under(&mut tree, root, "a", &[]);
            tree.rename(root, "a", "b")?;
            assert_eq!(tree.child(root, "b"), Some(a));
            assert!(tree.child(root, "a").is_none());
            assert_eq!(tree.node(a).name(), "b");
            assert_eq!(tree.node(a).parent(), Some(root));
            Ok(())
        }

        #[test]
        fn test_rename_collision_is_noop() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = file_under(&mut tree, root, "a", &[]);
            let b = file_under(&mut tree, root, "b", &[]);
            assert_eq!(
                tree.rename(root, "a", "b"),
                Err(FsError::NameCollision("b".to_string()))
            );
            assert_eq!(tree.child(root, "a"), Some(a));
            assert_eq!(tree.child(root, "b"), Some(b));
            assert_eq!(tree.node(a).name(), "a");
        }
    }

    mod copies {
        use super::*;

        #[test]
        fn test_copy_subtree_is_independent() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            let sub = dir_under(&mut tree, a, "sub");
            let f = file_under(&mut tree, sub, "f", &["x", "y"]);

            let copy = tree.copy_subtree(a);
            assert!(tree.node(copy).parent().is_none());
            let copy_sub = tree.child(copy, "sub").unwrap();
            let copy_f = tree.child(copy_sub, "f").unwrap();
            assert_ne!(copy_f, f);
            assert_eq!(tree.node(copy_sub).parent(), Some(copy));
            assert_eq!(tree.node(copy_f).parent(), Some(copy_sub));

            tree.extend_lines(copy_f, vec!["z".to_string()])?;
            assert_eq!(tree.node(f).as_file().unwrap(), ["x", "y"]);
            assert_eq!(tree.node(copy_f).as_file().unwrap(), ["x", "y", "z"]);
            Ok(())
        }

        #[test]
        fn test_copy_deep_tree() -> Result<()> {
            let mut tree = Tree::new();
            let root = tree.root();
            let top = dir_under(&mut tree, root, "top");
            let mut current = top;
            for _ in 0..2000 {
                current = dir_under(&mut tree, current, "d");
            }
            let before = tree.len();
            let copy = tree.copy_subtree(top);
            assert_eq!(tree.len(), before * 2 - 1);

            tree.free_subtree(copy);
            assert_eq!(tree.len(), before);
            Ok(())
        }

        #[test]
        fn test_set_lines_on_directory() {
            let mut tree = Tree::new();
            let root = tree.root();
            let a = dir_under(&mut tree, root, "a");
            assert_eq!(
                tree.set_lines(a, vec![]),
                Err(FsError::NotAFile("/a".to_string()))
            );
        }
    }
}
