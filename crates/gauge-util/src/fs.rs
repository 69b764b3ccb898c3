//! Filesystem abstraction and path helpers.
//!
//! Everything that touches the disk goes through the [`FileSystem`] trait so
//! that project lookups can run against [`OsFs`] in production and against
//! [`crate::memfs::MemoryFs`] in tests.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// The filesystem operations needed by project discovery and property files.
pub trait FileSystem {
    /// The process (or simulated) working directory.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// `true` for files and directories alike; `false` on any error.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if `path` itself is a symbolic link.
    fn is_symlink(&self, _path: &Path) -> bool {
        false
    }

    /// Full paths of the direct children of `path`.
    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Append `contents` to `path`, creating the file if it does not exist.
    fn append(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Create or truncate `path` and write `contents` to it.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        path.is_symlink()
    }

    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        Ok(std::fs::read_dir(path)?
            .flatten()
            .map(|entry| entry.path())
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn append(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        file.flush()
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// One step of the upward walk.
///
/// At the filesystem root the parent of a directory is the directory itself;
/// callers stop ascending when this returns its input.
pub fn parent_or_self(dir: &Path) -> &Path {
    match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => dir,
    }
}

/// Iterator over `start` and each of its ancestors, ending at the root.
pub fn ancestors_inclusive(start: &Path) -> AncestorsInclusive<'_> {
    AncestorsInclusive {
        next: Some(start),
    }
}

/// See [`ancestors_inclusive`].
#[derive(Debug, Clone)]
pub struct AncestorsInclusive<'a> {
    next: Option<&'a Path>,
}

impl<'a> Iterator for AncestorsInclusive<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<&'a Path> {
        let current = self.next?;
        let parent = parent_or_self(current);
        self.next = if parent == current { None } else { Some(parent) };
        Some(current)
    }
}

/// Walk up from `start` looking for an entry named `filename`.
/// Returns the first directory (inclusive of `start`) that contains it.
pub fn find_ancestor_with<F: FileSystem + ?Sized>(
    fs: &F,
    start: &Path,
    filename: &str,
) -> Option<PathBuf> {
    for dir in ancestors_inclusive(start) {
        tracing::trace!("Looking for {} in {}", filename, dir.display());
        if fs.exists(&dir.join(filename)) {
            return Some(dir.to_path_buf());
        }
    }
    None
}

/// Fold `.` and `..` components without touching the disk.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Make `path` absolute against the working directory of `fs` and normalize it.
pub fn absolutize<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&fs.current_dir()?.join(path)))
    }
}

/// Join `name` onto `root`, keeping the result inside `root`.
///
/// Leading root or prefix components of `name` are dropped, so `/etc` joins
/// as `<root>/etc`. Returns `None` if `..` components climb above `root`.
pub fn join_within(root: &Path, name: &Path) -> Option<PathBuf> {
    let relative: PathBuf = name
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    let root = normalize(root);
    let joined = normalize(&root.join(relative));
    joined.starts_with(&root).then_some(joined)
}

/// `true` if `path` names an existing file or directory. Never errors.
pub fn file_exists(path: &Path) -> bool {
    OsFs.exists(path)
}

/// `true` only if `path` names an existing directory.
pub fn dir_exists(path: &Path) -> bool {
    OsFs.is_dir(path)
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
