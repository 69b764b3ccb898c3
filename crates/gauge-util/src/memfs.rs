//! In-memory [`FileSystem`] used to exercise project lookups without touching
//! the disk.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use crate::fs::{normalize, parent_or_self, FileSystem};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(String),
}

/// A directory tree held in a map keyed by absolute, normalized path.
///
/// Relative paths are resolved against a settable working directory, which
/// starts at `/`. Not `Sync`; intended for single-threaded tests.
#[derive(Debug)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    cwd: RefCell<PathBuf>,
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), Node::Dir);
        Self {
            nodes: RefCell::new(nodes),
            cwd: RefCell::new(PathBuf::from("/")),
        }
    }

    /// Change the simulated working directory. The directory must exist.
    pub fn set_current_dir(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = self.resolve(path.as_ref());
        if !self.is_dir(&path) {
            return Err(not_found(&path));
        }
        *self.cwd.borrow_mut() = path;
        Ok(())
    }

    /// Add a directory and any missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert_dirs(&path);
        self
    }

    /// Add a file with the given contents, creating parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) -> &Self {
        let path = self.resolve(path.as_ref());
        self.insert_dirs(parent_or_self(&path));
        self.nodes
            .borrow_mut()
            .insert(path, Node::File(contents.to_string()));
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.cwd.borrow().join(path))
        }
    }

    fn insert_dirs(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for dir in path.ancestors() {
            if dir.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(dir.to_path_buf()).or_insert(Node::Dir);
        }
    }

    fn node(&self, path: &Path) -> Option<Node> {
        self.nodes.borrow().get(&self.resolve(path)).cloned()
    }
}

fn not_found(path: &Path) -> Error {
    Error::new(
        ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.cwd.borrow().clone())
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(Node::Dir))
    }

    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        let dir = self.resolve(path);
        match self.node(&dir) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(Error::new(
                    ErrorKind::Other,
                    format!("{} is not a directory", dir.display()),
                ))
            }
            None => return Err(not_found(&dir)),
        }
        Ok(self
            .nodes
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir.as_path()))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        match self.node(path) {
            Some(Node::File(contents)) => Ok(contents),
            Some(Node::Dir) => Err(Error::new(
                ErrorKind::Other,
                format!("{} is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn append(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let path = self.resolve(path);
        if !self.is_dir(parent_or_self(&path)) {
            return Err(not_found(parent_or_self(&path)));
        }
        let mut nodes = self.nodes.borrow_mut();
        match nodes.entry(path).or_insert_with(|| Node::File(String::new())) {
            Node::File(existing) => {
                existing.push_str(contents);
                Ok(())
            }
            Node::Dir => Err(Error::new(ErrorKind::Other, "cannot append to a directory")),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if self.is_dir(path) {
            return Err(Error::new(ErrorKind::Other, "cannot write to a directory"));
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        if self.is_file(path) {
            return Err(Error::new(ErrorKind::AlreadyExists, "a file exists at this path"));
        }
        self.add_dir(path);
        Ok(())
    }
}
