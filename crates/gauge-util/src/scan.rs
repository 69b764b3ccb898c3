//! Best-effort recursive file scanning.
//!
//! Traversal errors (missing directories, permission problems, entries that
//! vanish mid-walk) are never surfaced: the affected subtree simply
//! contributes no matches.

use std::path::{Path, PathBuf};

use crate::fs::{FileSystem, OsFs};

/// Recursively collect every file under `dir` for which `predicate` holds.
///
/// Results are in traversal order, not sorted. Directories are descended
/// into but never reported; symlinked directories are not followed.
pub fn collect_files<F, P>(fs: &F, dir: &Path, predicate: P) -> Vec<PathBuf>
where
    F: FileSystem + ?Sized,
    P: Fn(&Path) -> bool,
{
    let mut out = Vec::new();
    walk(fs, dir, &predicate, &mut out);
    out
}

fn walk<F, P>(fs: &F, dir: &Path, predicate: &P, out: &mut Vec<PathBuf>)
where
    F: FileSystem + ?Sized,
    P: Fn(&Path) -> bool,
{
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping {}: {}", dir.display(), e);
            return;
        }
    };
    for path in entries {
        if fs.is_symlink(&path) && fs.is_dir(&path) {
            tracing::trace!("Not following symlinked directory {}", path.display());
        } else if fs.is_dir(&path) {
            walk(fs, &path, predicate, out);
        } else if fs.is_file(&path) && predicate(&path) {
            out.push(path);
        }
    }
}

/// [`collect_files`] against the real filesystem.
pub fn find_files_in_dir<P>(dir: &Path, predicate: P) -> Vec<PathBuf>
where
    P: Fn(&Path) -> bool,
{
    collect_files(&OsFs, dir, predicate)
}

/// `true` if `path` has the extension `ext` (given without the dot).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}
