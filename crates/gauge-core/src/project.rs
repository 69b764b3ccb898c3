//! Project root discovery and project-relative path resolution.
//!
//! A project root is the nearest directory, walking upward, that contains the
//! manifest file. It is recomputed on every call.

use std::path::{Path, PathBuf};

use gauge_util::errors::{GaugeError, GaugeResult};
use gauge_util::fs::{absolutize, find_ancestor_with, join_within, FileSystem, OsFs};
use gauge_util::scan::{collect_files, has_extension};

use crate::layout::{ProjectLayout, CONCEPT_FILE_EXTENSION, SPEC_FILE_EXTENSIONS};

const PROJECT_NOT_FOUND: &str = "Failed to find project directory";

/// Filesystem and layout used to answer project lookups.
///
/// `Project::new()` works against the real disk with the default layout and
/// `Project::from_config()` picks up `<gauge home>/config/layout.toml`;
/// tests swap in [`gauge_util::memfs::MemoryFs`].
#[derive(Debug, Clone, Default)]
pub struct Project<F: FileSystem = OsFs> {
    fs: F,
    layout: ProjectLayout,
}

impl Project<OsFs> {
    pub fn new() -> Self {
        Self::with_fs(OsFs)
    }

    /// Real disk, with names overridden by the layout config when it exists.
    pub fn from_config() -> GaugeResult<Self> {
        Self::new().with_layout_from(&ProjectLayout::default_path())
    }
}

impl<F: FileSystem> Project<F> {
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            layout: ProjectLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: ProjectLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use the layout stored at `path`, read through this project's filesystem.
    pub fn with_layout_from(self, path: &Path) -> GaugeResult<Self> {
        let layout = ProjectLayout::load_from(&self.fs, path)?;
        Ok(self.with_layout(layout))
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Find the project root by walking up from the working directory.
    pub fn root(&self) -> GaugeResult<PathBuf> {
        let cwd = absolutize(&self.fs, &self.fs.current_dir()?)?;
        self.root_from_dir(&cwd)
    }

    /// Find the project root by walking up from the directory containing `path`.
    ///
    /// `path` may be relative and may name a file or a directory. A trailing
    /// separator marks it as the directory itself.
    pub fn root_from_path(&self, path: &Path) -> GaugeResult<PathBuf> {
        let start = absolutize(&self.fs, containing_dir(path))?;
        self.root_from_dir(&start)
    }

    fn root_from_dir(&self, start: &Path) -> GaugeResult<PathBuf> {
        tracing::debug!("Searching for project root from {}", start.display());
        match find_ancestor_with(&self.fs, start, &self.layout.manifest_file) {
            Some(root) => {
                tracing::debug!("Found project root at {}", root.display());
                Ok(root)
            }
            None => Err(GaugeError::not_found(PROJECT_NOT_FOUND)),
        }
    }

    /// Root found from `start` if given and non-empty, else from the working directory.
    fn root_from(&self, start: Option<&Path>) -> GaugeResult<PathBuf> {
        match start.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => self.root_from_path(path),
            None => self.root(),
        }
    }

    /// Resolve `dir_name` inside the project root, failing if it does not exist.
    pub fn dir_in_project(&self, dir_name: &str, start: Option<&Path>) -> GaugeResult<PathBuf> {
        let root = self.root_from(start)?;
        self.existing_in_root(&root, dir_name)
    }

    /// `<root>/<dir_name>`, which must exist and must not climb out of `root`.
    fn existing_in_root(&self, root: &Path, dir_name: &str) -> GaugeResult<PathBuf> {
        let Some(dir) = join_within(root, Path::new(dir_name)) else {
            return Err(GaugeError::not_found(format!(
                "Could not find {dir_name} directory. {} is outside the project {}",
                root.join(dir_name).display(),
                root.display()
            )));
        };
        if !self.fs.exists(&dir) {
            return Err(GaugeError::not_found(format!(
                "Could not find {dir_name} directory. {} does not exist",
                dir.display()
            )));
        }
        Ok(dir)
    }

    /// `<root>/env/default/default.properties`, which must already exist.
    pub fn default_properties_file(&self) -> GaugeResult<PathBuf> {
        let root = self.root()?;
        self.existing_in_root(&root, &self.layout.env_dir)?;
        let relative = self.layout.default_properties_path();
        join_within(&root, &relative)
            .filter(|file| self.fs.exists(file))
            .ok_or_else(|| {
                GaugeError::not_found(format!(
                    "Default environment file does not exist: {}",
                    root.join(&relative).display()
                ))
            })
    }

    pub fn specs_dir(&self, start: Option<&Path>) -> GaugeResult<PathBuf> {
        self.dir_in_project(&self.layout.specs_dir, start)
    }

    pub fn env_dir(&self, start: Option<&Path>) -> GaugeResult<PathBuf> {
        self.dir_in_project(&self.layout.env_dir, start)
    }

    /// `true` if `<root>/<name>` exists. Names that climb out of `root` never do.
    pub fn sub_directory_exists(&self, root: &Path, name: &str) -> bool {
        join_within(root, Path::new(name)).is_some_and(|dir| self.fs.exists(&dir))
    }

    pub fn file_exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// All files under `dir` matching `predicate`. Best effort: never errors.
    pub fn find_files_in_dir<P>(&self, dir: &Path, predicate: P) -> Vec<PathBuf>
    where
        P: Fn(&Path) -> bool,
    {
        collect_files(&self.fs, dir, predicate)
    }

    pub fn find_spec_files(&self, dir: &Path) -> Vec<PathBuf> {
        self.find_files_in_dir(dir, is_spec_file)
    }

    pub fn find_concept_files(&self, dir: &Path) -> Vec<PathBuf> {
        self.find_files_in_dir(dir, is_concept_file)
    }
}

/// The directory a path lives in; the path itself if it ends in a separator.
fn containing_dir(path: &Path) -> &Path {
    if path
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator)
    {
        return path;
    }
    path.parent().unwrap_or(path)
}

pub fn is_spec_file(path: &Path) -> bool {
    SPEC_FILE_EXTENSIONS
        .iter()
        .any(|ext| has_extension(path, ext))
}

pub fn is_concept_file(path: &Path) -> bool {
    has_extension(path, CONCEPT_FILE_EXTENSION)
}

/// Find the project root by walking up from the current working directory.
pub fn get_project_root() -> GaugeResult<PathBuf> {
    Project::from_config()?.root()
}

/// Find the project root by walking up from the directory containing `path`.
pub fn get_project_root_from_spec_path(path: impl AsRef<Path>) -> GaugeResult<PathBuf> {
    Project::from_config()?.root_from_path(path.as_ref())
}

/// Resolve `dir_name` inside the project found from `start_path`, or from the
/// working directory when `start_path` is empty.
pub fn get_dir_in_project(dir_name: &str, start_path: impl AsRef<Path>) -> GaugeResult<PathBuf> {
    Project::from_config()?.dir_in_project(dir_name, Some(start_path.as_ref()))
}

pub fn get_default_properties_file() -> GaugeResult<PathBuf> {
    Project::from_config()?.default_properties_file()
}

pub fn get_specs_dir(start_path: impl AsRef<Path>) -> GaugeResult<PathBuf> {
    Project::from_config()?.specs_dir(Some(start_path.as_ref()))
}

pub fn get_env_dir(start_path: impl AsRef<Path>) -> GaugeResult<PathBuf> {
    Project::from_config()?.env_dir(Some(start_path.as_ref()))
}

pub fn sub_directory_exists(root: &Path, name: &str) -> bool {
    Project::new().sub_directory_exists(root, name)
}

pub fn find_spec_files(dir: &Path) -> Vec<PathBuf> {
    Project::new().find_spec_files(dir)
}

pub fn find_concept_files(dir: &Path) -> Vec<PathBuf> {
    Project::new().find_concept_files(dir)
}
