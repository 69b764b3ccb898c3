//! Environment `.properties` files.
//!
//! A property is written as a two-line record, `# <comment>` followed by
//! `<name> = <value>`, and appended after whatever the file already holds.
//! Readers treat a later record for the same name as overriding earlier ones.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use gauge_util::errors::GaugeResult;
use gauge_util::fs::FileSystem;

use crate::project::Project;

/// A named environment value with the comment written above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub comment: String,
    pub default_value: String,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        comment: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            default_value: default_value.into(),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.comment)?;
        writeln!(f, "{} = {}", self.name, self.default_value)
    }
}

impl<F: FileSystem> Project<F> {
    /// Append `properties` to `path` in the order given, creating the file if needed.
    ///
    /// No deduplication: a name already present is written again.
    pub fn append_properties(&self, path: &Path, properties: &[Property]) -> GaugeResult<()> {
        let records: String = properties.iter().map(Property::to_string).collect();
        self.fs().append(path, &records)?;
        tracing::debug!(
            "Appended {} properties to {}",
            properties.len(),
            path.display()
        );
        Ok(())
    }

    pub fn read_file_contents(&self, path: &Path) -> GaugeResult<String> {
        Ok(self.fs().read_to_string(path)?)
    }

    /// Create or truncate `path` with `contents`, creating parent directories.
    pub fn save_file(&self, path: &Path, contents: &str) -> GaugeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs().create_dir_all(parent)?;
        }
        Ok(self.fs().write(path, contents)?)
    }

    /// Parse the properties file at `path`. A missing file yields an empty map.
    pub fn load_properties(&self, path: &Path) -> GaugeResult<BTreeMap<String, String>> {
        if !self.fs().is_file(path) {
            return Ok(BTreeMap::new());
        }
        let content = self.read_file_contents(path)?;
        Ok(parse_properties(&content))
    }
}

/// Parse `key = value` lines, skipping blanks and `#`/`!` comments.
///
/// Later keys override earlier ones.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// Append `properties` to the file at `path`, in order.
pub fn append_properties(path: &Path, properties: &[Property]) -> GaugeResult<()> {
    Project::new().append_properties(path, properties)
}

pub fn read_file_contents(path: &Path) -> GaugeResult<String> {
    Project::new().read_file_contents(path)
}

pub fn save_file(path: &Path, contents: &str) -> GaugeResult<()> {
    Project::new().save_file(path, contents)
}

pub fn load_properties(path: &Path) -> GaugeResult<BTreeMap<String, String>> {
    Project::new().load_properties(path)
}
