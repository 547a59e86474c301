//! The file system a shell session works on: the tree plus the current directory cursor.

use tracing::debug;

use crate::core::{FsBackend, Listing, Result};
use crate::error::FsError;
use crate::vfs::{Node, NodeId, Tree, resolve};

/// In-memory file system with a current working directory.
///
/// ### Invariants
///
/// 1. **Root existence**: the root directory `/` is created once and never removed.
/// 2. **Unique names**: no directory holds two children with the same name.
/// 3. **Parent consistency**: every attached node's parent lists it under its current name.
/// 4. **No cycles**: a directory is never moved under itself, so parent chains end at the root.
/// 5. **Cwd**: `cwd` always addresses a live directory.
///
/// All operations check every failure condition before mutating anything.
///
/// ### Example
///
/// ```no_run
/// let mut fs = FileSystemStore::new();
/// fs.mkdir("docs").unwrap();
/// fs.cd("docs").unwrap();
/// fs.touch("note.txt").unwrap();
/// fs.write("note.txt", vec!["Hello".into()]).unwrap();
/// assert_eq!(fs.cat("/docs/note.txt").unwrap(), ["Hello"]);
/// ```
#[derive(Debug)]
pub struct FileSystemStore {
    tree: Tree,
    cwd: NodeId,
}

impl Default for FileSystemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemStore {
    pub fn new() -> Self {
        let tree = Tree::new();
        let cwd = tree.root();
        Self { tree, cwd }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cwd_id(&self) -> NodeId {
        self.cwd
    }

    pub fn resolve(&self, path: &str) -> Result<NodeId> {
        resolve(&self.tree, self.cwd, path)
    }

    fn resolve_dir(&self, path: &str) -> Result<NodeId> {
        let id = self.resolve(path)?;
        if !self.tree.node(id).is_dir() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        Ok(id)
    }

    fn resolve_file(&self, path: &str) -> Result<NodeId> {
        let id = self.resolve(path)?;
        if !self.tree.node(id).is_file() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        Ok(id)
    }

    /// Creates `node` under the current directory.
    fn create(&mut self, node: Node) -> Result<()> {
        validate_name(node.name())?;
        if self.tree.child(self.cwd, node.name()).is_some() {
            return Err(FsError::NameCollision(node.name().to_string()));
        }
        let id = self.tree.insert(node);
        self.tree.add(self.cwd, id)
    }
}

impl FsBackend for FileSystemStore {
    fn cwd(&self) -> String {
        self.tree.path(self.cwd)
    }

    /// Changes the current working directory.
    /// On any error the current directory stays where it was.
    fn cd(&mut self, path: &str) -> Result<()> {
        self.cwd = self.resolve_dir(path)?;
        debug!(cwd = %self.cwd(), "changed directory");
        Ok(())
    }

    fn mkdir(&mut self, name: &str) -> Result<()> {
        self.create(Node::directory(name))?;
        debug!(name, cwd = %self.cwd(), "created directory");
        Ok(())
    }

    fn touch(&mut self, name: &str) -> Result<()> {
        self.create(Node::file(name))?;
        debug!(name, cwd = %self.cwd(), "created file");
        Ok(())
    }

    /// Removes the direct child `name` of the current directory together with its subtree.
    fn rm(&mut self, name: &str) -> Result<()> {
        let removed = self.tree.remove(self.cwd, name)?;
        self.tree.free_subtree(removed);
        debug!(name, cwd = %self.cwd(), "removed entry");
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        validate_name(new)?;
        self.tree.rename(self.cwd, old, new)?;
        debug!(old, new, cwd = %self.cwd(), "renamed entry");
        Ok(())
    }

    /// Moves `src` into the directory `dst`.
    ///
    /// # Errors
    /// * resolution errors of either path
    /// * `NotADirectory` - `dst` is a file
    /// * `InvalidMove` - `src` is the root, or `dst` lies inside `src`
    /// * `NameCollision` - `dst` already holds a child named like `src`
    fn mv(&mut self, src: &str, dst: &str) -> Result<()> {
        let src_id = self.resolve(src)?;
        let dst_id = self.resolve_dir(dst)?;
        let parent = self.tree.node(src_id).parent();
        let Some(parent) = parent else {
            return Err(FsError::InvalidMove {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        };
        if self.tree.is_ancestor(src_id, dst_id) {
            return Err(FsError::InvalidMove {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        }
        let name = self.tree.node(src_id).name().to_string();
        if parent == dst_id {
            // already there
            return Ok(());
        }
        if self.tree.child(dst_id, &name).is_some() {
            return Err(FsError::NameCollision(name));
        }

        let moved = self.tree.remove(parent, &name)?;
        self.tree.add(dst_id, moved)?;
        debug!(from = src, to = %self.tree.path(moved), "moved entry");
        Ok(())
    }

    /// Adds a deep copy of `src` to the directory `dst`. The source is never touched.
    ///
    /// # Errors
    /// * resolution errors of either path
    /// * `NotADirectory` - `dst` is a file
    /// * `InvalidCopy` - `src` is the root
    /// * `NameCollision` - `dst` already holds a child named like `src`
    fn cp(&mut self, src: &str, dst: &str) -> Result<()> {
        let src_id = self.resolve(src)?;
        let dst_id = self.resolve_dir(dst)?;
        if self.tree.node(src_id).parent().is_none() {
            return Err(FsError::InvalidCopy {
                src: src.to_string(),
                dst: dst.to_string(),
            });
        }
        let name = self.tree.node(src_id).name();
        if self.tree.child(dst_id, name).is_some() {
            return Err(FsError::NameCollision(name.to_string()));
        }

        let copy = self.tree.copy_subtree(src_id);
        if let Err(e) = self.tree.add(dst_id, copy) {
            self.tree.free_subtree(copy);
            return Err(e);
        }
        debug!(from = src, to = %self.tree.path(copy), "copied entry");
        Ok(())
    }

    fn cat(&self, path: &str) -> Result<Vec<String>> {
        let id = self.resolve_file(path)?;
        Ok(self.tree.node(id).as_file().unwrap_or_default().to_vec())
    }

    /// Replaces the entire content of an existing file.
    fn write(&mut self, path: &str, lines: Vec<String>) -> Result<()> {
        let id = self.resolve_file(path)?;
        let count = lines.len();
        self.tree.set_lines(id, lines)?;
        debug!(path, lines = count, "wrote file");
        Ok(())
    }

    /// Appends lines to an existing file, keeping its old content.
    fn append(&mut self, path: &str, lines: Vec<String>) -> Result<()> {
        let id = self.resolve_file(path)?;
        let count = lines.len();
        self.tree.extend_lines(id, lines)?;
        debug!(path, lines = count, "appended to file");
        Ok(())
    }

    fn ls(&self) -> Vec<Listing> {
        self.tree
            .node(self.cwd)
            .as_dir()
            .map(|children| {
                children
                    .iter()
                    .map(|(name, &id)| Listing {
                        name: name.clone(),
                        is_dir: self.tree.node(id).is_dir(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn ensure_file(&self, path: &str) -> Result<()> {
        self.resolve_file(path).map(|_| ())
    }
}

/// Rejects names that path resolution could never reach.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}
