//! Error kinds reported by tree operations.
//!
//! None of them is fatal: the shell renders the message and keeps going.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    /// A sibling with the same name already exists.
    #[error("Item '{0}' already exists")]
    NameCollision(String),

    /// No child with this name in the addressed directory.
    #[error("Item '{0}' not found")]
    NotFound(String),

    /// Resolution hit a missing segment.
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Resolution tried to descend through a file, or a directory was expected.
    #[error("Not a folder: {0}")]
    NotADirectory(String),

    /// A file was expected but the path addresses a directory.
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Empty name, a name with `/`, or one of `.` and `..`.
    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    /// Moving the root, or moving a directory under itself.
    #[error("Cannot move '{src}' into '{dst}'")]
    InvalidMove { src: String, dst: String },

    /// Copying the root, which has no name a child could carry.
    #[error("Cannot copy '{src}' into '{dst}'")]
    InvalidCopy { src: String, dst: String },
}
