use gauge_util::errors::{GaugeError, GaugeResult};
use gauge_util::fs::{FileSystem, OsFs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker file whose presence makes a directory a project root.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Directory holding the project's environments.
pub const ENV_DIRECTORY_NAME: &str = "env";
/// Environment used when none is selected.
pub const DEFAULT_ENV_DIR: &str = "default";
/// Properties file inside each environment directory.
pub const DEFAULT_ENV_FILE_NAME: &str = "default.properties";
pub const SPECS_DIRECTORY_NAME: &str = "specs";

pub const SPEC_FILE_EXTENSIONS: &[&str] = &["spec", "md"];
pub const CONCEPT_FILE_EXTENSION: &str = "cpt";

/// Names of the fixed files and directories inside a project.
///
/// Loaded from `<gauge home>/config/layout.toml` when that file exists;
/// every key is optional and falls back to the constants above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLayout {
    #[serde(rename = "manifest-file")]
    pub manifest_file: String,
    #[serde(rename = "env-dir")]
    pub env_dir: String,
    #[serde(rename = "default-env")]
    pub default_env: String,
    #[serde(rename = "default-env-file")]
    pub default_env_file: String,
    #[serde(rename = "specs-dir")]
    pub specs_dir: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            manifest_file: MANIFEST_FILE.to_string(),
            env_dir: ENV_DIRECTORY_NAME.to_string(),
            default_env: DEFAULT_ENV_DIR.to_string(),
            default_env_file: DEFAULT_ENV_FILE_NAME.to_string(),
            specs_dir: SPECS_DIRECTORY_NAME.to_string(),
        }
    }
}

impl ProjectLayout {
    /// Load the layout from the default config path, or return defaults if it doesn't exist.
    pub fn load() -> GaugeResult<Self> {
        Self::load_from(&OsFs, &Self::default_path())
    }

    /// Load the layout at `path` through `fs`; defaults if there is no such file.
    pub fn load_from<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> GaugeResult<Self> {
        if !fs.is_file(path) {
            return Ok(Self::default());
        }
        let content = fs.read_to_string(path)?;
        tracing::debug!("Loading project layout from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> GaugeResult<Self> {
        toml::from_str(content).map_err(|e| GaugeError::Config {
            message: format!("Failed to parse layout config: {e}"),
        })
    }

    /// Returns the default path to the layout config file.
    pub fn default_path() -> PathBuf {
        gauge_home().join("config").join("layout.toml")
    }

    /// `<env>/<default env>/<default env file>`, relative to a project root.
    pub fn default_properties_path(&self) -> PathBuf {
        Path::new(&self.env_dir)
            .join(&self.default_env)
            .join(&self.default_env_file)
    }
}

/// Returns the Gauge home directory: `$GAUGE_HOME`, else `~/.gauge`.
pub fn gauge_home() -> PathBuf {
    if let Some(home) = std::env::var_os("GAUGE_HOME").filter(|h| !h.is_empty()) {
        return PathBuf::from(home);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".gauge")
}
