use std::collections::BTreeMap;

/// Index of a node slot in the [`Tree`](super::Tree) arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeType {
    File,
    Directory,
}

/// Payload of a node: file lines or owned children.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeKind {
    File { lines: Vec<String> },
    Directory { children: BTreeMap<String, NodeId> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>, // never owning
    kind: NodeKind,
}

impl Node {
    pub fn file<S: Into<String>>(name: S) -> Node {
        Node {
            name: name.into(),
            parent: None,
            kind: NodeKind::File { lines: Vec::new() },
        }
    }

    pub fn directory<S: Into<String>>(name: S) -> Node {
        Node {
            name: name.into(),
            parent: None,
            kind: NodeKind::Directory {
                children: BTreeMap::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::File { .. } => NodeType::File,
            NodeKind::Directory { .. } => NodeType::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.node_type() == NodeType::File
    }

    pub fn is_dir(&self) -> bool {
        self.node_type() == NodeType::Directory
    }

    pub fn as_file(&self) -> Option<&[String]> {
        match &self.kind {
            NodeKind::File { lines } => Some(lines),
            NodeKind::Directory { .. } => None,
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.kind {
            NodeKind::File { lines } => Some(lines),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn as_dir(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(crate) fn as_dir_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// Same name and a value copy of the lines; directories come back empty,
    /// their children are copied by [`Tree::copy_subtree`](super::Tree::copy_subtree).
    pub(crate) fn shallow_copy(&self) -> Node {
        let kind = match &self.kind {
            NodeKind::File { lines } => NodeKind::File {
                lines: lines.clone(),
            },
            NodeKind::Directory { .. } => NodeKind::Directory {
                children: BTreeMap::new(),
            },
        };
        Node {
            name: self.name.clone(),
            parent: None,
            kind,
        }
    }
}
