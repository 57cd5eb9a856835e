//! Project metadata from `package.json` and the SEA configuration file.

use crate::error::{PackagerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The parts of `package.json` the packager reads.
#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

/// Application metadata extracted from `package.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    /// Executable base name (npm scope removed)
    pub name: String,

    /// Package version, informational only
    pub version: Option<String>,
}

impl AppMetadata {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: executable_name(name.as_ref()),
            version: None,
        }
    }
}

/// Strip an npm scope so the package name is usable as a file name.
///
/// `@acme/cli` becomes `cli`; unscoped names are returned unchanged.
pub fn executable_name(package_name: &str) -> String {
    match package_name.strip_prefix('@') {
        Some(scoped) => scoped
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(scoped)
            .to_string(),
        None => package_name.to_string(),
    }
}

/// Load application metadata from a `package.json` file.
pub fn load_package_json(path: &Path) -> Result<AppMetadata> {
    let contents = std::fs::read_to_string(path).map_err(|e| PackagerError::Metadata {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    let package: PackageJson =
        serde_json::from_str(&contents).map_err(|e| PackagerError::Metadata {
            path: path.to_path_buf(),
            reason: format!("failed to parse: {e}"),
        })?;

    let name = package
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| PackagerError::Metadata {
            path: path.to_path_buf(),
            reason: "missing \"name\" field".to_string(),
        })?;

    let name = executable_name(name.trim());
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(PackagerError::Metadata {
            path: path.to_path_buf(),
            reason: format!("\"{name}\" is not usable as an executable name"),
        });
    }

    Ok(AppMetadata {
        name,
        version: package.version,
    })
}

/// Node single executable application configuration (`sea-config.json`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeaConfig {
    /// Script embedded into the executable
    pub main: String,

    /// Where node writes the preparation blob
    pub output: String,

    #[serde(default, rename = "disableExperimentalSEAWarning")]
    pub disable_experimental_sea_warning: Option<bool>,

    #[serde(default)]
    pub use_snapshot: Option<bool>,

    #[serde(default)]
    pub use_code_cache: Option<bool>,
}

impl SeaConfig {
    /// Blob output path, resolved against the directory node runs in.
    pub fn output_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output)
    }
}

/// Load and validate a SEA configuration file.
///
/// A missing file is reported as [`PackagerError::MissingSeaConfig`].
pub fn load_sea_config(path: &Path) -> Result<SeaConfig> {
    if !path.is_file() {
        return Err(PackagerError::MissingSeaConfig {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| PackagerError::SeaConfig {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    serde_json::from_str(&contents).map_err(|e| PackagerError::SeaConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
