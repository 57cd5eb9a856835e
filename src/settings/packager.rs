//! Immutable configuration for the executable packager.

use super::Platform;
use crate::metadata::AppMetadata;
use std::path::{Path, PathBuf};

/// Marker postject searches for to flip the SEA fuse in the node binary.
pub const SENTINEL_FUSE: &str = "NODE_SEA_FUSE_fce680ab2cc467b6e072b8b5df1996b2";

/// Resource name the blob is injected under.
pub const SEA_RESOURCE_NAME: &str = "NODE_SEA_BLOB";

/// Mach-O segment the blob is injected into on macOS.
pub const MACHO_SEGMENT_NAME: &str = "NODE_SEA";

pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_BIN_DIR: &str = "bin";
pub const DEFAULT_SEA_CONFIG_FILE: &str = "sea-config.json";
pub const DEFAULT_BLOB_FILE: &str = "sea-prep.blob";
pub const DEFAULT_BUILD_SCRIPT: &str = "build:ts";
pub const PACKAGE_MANAGER: &str = "pnpm";
pub const RUNTIME: &str = "node";

/// Packager settings, computed once at startup and read by every step.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
#[derive(Clone, Debug)]
pub struct PackagerSettings {
    pub(super) project_root: PathBuf,
    pub(super) platform: Platform,
    pub(super) app: AppMetadata,
    pub(super) dist_dir: PathBuf,
    pub(super) bin_dir: PathBuf,
    pub(super) sea_config_file: PathBuf,
    pub(super) blob_file: PathBuf,
    pub(super) app_file: PathBuf,
    pub(super) build_script: String,
    pub(super) required_tools: Vec<String>,
}

impl PackagerSettings {
    /// Directory every command runs in.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn app(&self) -> &AppMetadata {
        &self.app
    }

    /// Bundle output directory cleaned before the build.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Directory holding the blob and the final executable.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn sea_config_file(&self) -> &Path {
        &self.sea_config_file
    }

    /// Where node is expected to write the preparation blob.
    pub fn blob_file(&self) -> &Path {
        &self.blob_file
    }

    /// Final executable: `<bin>/<name>` plus `.exe` on Windows.
    pub fn app_file(&self) -> &Path {
        &self.app_file
    }

    /// Package script that produces the bundle (run as `pnpm run <script>`).
    pub fn build_script(&self) -> &str {
        &self.build_script
    }

    /// Tools that must be on PATH and answer `--version`.
    pub fn required_tools(&self) -> &[String] {
        &self.required_tools
    }

    /// Tools that must merely be present for the platform steps.
    pub fn platform_tools(&self) -> Vec<String> {
        self.platform
            .signing_tools()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }
}
