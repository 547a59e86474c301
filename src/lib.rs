//! An in-memory hierarchical file system with a small interactive shell.
//!
//! ### Overview
//!
//! `vfs-tree` keeps a tree of directories and text files entirely in memory and lets you
//! navigate and change it through a handful of shell-like commands.
//!
//! **Key ideas**:
//! - **Arena tree**: every node lives in a [`Tree`] slot; directories own their children,
//!   parent links are plain ids.
//! - **Path resolution**: [`resolve`] walks `.`, `..` and named segments from the root or from
//!   the current directory and never mutates anything.
//! - **All or nothing**: each [`FsBackend`] operation checks all its preconditions first, so a
//!   failed command leaves the tree exactly as it was.
//! - **Non-fatal errors**: every [`FsError`] is rendered by the [`Shell`] and the session
//!   continues.

mod config;
mod core;
mod error;
mod shell;
mod vfs;

pub use config::{DEFAULT_SENTINEL, ShellConfig};
pub use self::core::{FsBackend, Listing, Result};
pub use error::FsError;
pub use shell::{Command, Shell, UnknownCommand};
pub use vfs::{FileSystemStore, Node, NodeId, NodeType, Tree, resolve};
