use crate::error::FsError;

/// Operation surface of a navigable in-memory file system.
///
/// Every method either completes fully or returns an error without touching the tree.
pub trait FsBackend {
    /// Absolute path of the current working directory.
    fn cwd(&self) -> String;
    fn cd(&mut self, path: &str) -> Result<()>;
    fn mkdir(&mut self, name: &str) -> Result<()>;
    fn touch(&mut self, name: &str) -> Result<()>;
    fn rm(&mut self, name: &str) -> Result<()>;
    fn rename(&mut self, old: &str, new: &str) -> Result<()>;
    fn mv(&mut self, src: &str, dst: &str) -> Result<()>;
    fn cp(&mut self, src: &str, dst: &str) -> Result<()>;
    /// Lines of the file at `path`, in order.
    fn cat(&self, path: &str) -> Result<Vec<String>>;
    /// Replaces the whole content of the file at `path`.
    fn write(&mut self, path: &str, lines: Vec<String>) -> Result<()>;
    fn append(&mut self, path: &str, lines: Vec<String>) -> Result<()>;
    /// Children of the current directory, sorted by name.
    fn ls(&self) -> Vec<Listing>;
    /// Checks that `path` addresses a file without reading it.
    fn ensure_file(&self, path: &str) -> Result<()>;
}

/// One row of `ls` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub is_dir: bool,
}

pub type Result<T> = std::result::Result<T, FsError>;
