//! Builder for constructing [`PackagerSettings`].

use super::{
    Platform,
    packager::{
        DEFAULT_BIN_DIR, DEFAULT_BLOB_FILE, DEFAULT_BUILD_SCRIPT, DEFAULT_DIST_DIR,
        DEFAULT_SEA_CONFIG_FILE, PACKAGE_MANAGER, PackagerSettings, RUNTIME,
    },
};
use crate::{
    error::Result,
    metadata::{AppMetadata, load_package_json},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Builder for constructing [`PackagerSettings`].
///
/// The project root is made absolute against the current directory, and
/// every other relative path is resolved against it. Anything not set
/// falls back to the conventional layout (`dist/`, `bin/`, `sea-config.json`,
/// `bin/sea-prep.blob`, script `build:ts`).
///
/// # Examples
///
/// ```no_run
/// use node_sea_bundler::settings::{Platform, SettingsBuilder};
///
/// # fn example() -> node_sea_bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root(".")
///     .platform(Platform::Linux)
///     .build()?;
/// assert!(settings.app_file().is_absolute());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    platform: Option<Platform>,
    app: Option<AppMetadata>,
    dist_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    sea_config_file: Option<PathBuf>,
    blob_file: Option<PathBuf>,
    build_script: Option<String>,
    required_tools: Option<Vec<String>>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Project directory containing `package.json`. Defaults to `.`.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Target platform. Defaults to the detected host platform.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Use this metadata instead of reading `package.json`.
    pub fn app(mut self, app: AppMetadata) -> Self {
        self.app = Some(app);
        self
    }

    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn bin_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bin_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn sea_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sea_config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Blob location. Defaults to `sea-prep.blob` inside the bin directory.
    pub fn blob_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.blob_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build_script(mut self, script: impl Into<String>) -> Self {
        self.build_script = Some(script.into());
        self
    }

    /// Tools checked with `--version` during preflight. Defaults to pnpm and node.
    pub fn required_tools(mut self, tools: Vec<String>) -> Self {
        self.required_tools = Some(tools);
        self
    }

    /// Builds the settings.
    ///
    /// Fails on an unsupported host platform (when none was set), an
    /// unreadable `package.json` (when no metadata was set), or a dist or bin
    /// directory that contains the project root. Both directories are erased
    /// during packaging.
    pub fn build(self) -> Result<PackagerSettings> {
        let project_root =
            fs::absolute(&self.project_root.unwrap_or_else(|| PathBuf::from(".")))?;
        let platform = match self.platform {
            Some(platform) => platform,
            None => Platform::detect()?,
        };
        let app = match self.app {
            Some(app) => app,
            None => load_package_json(&project_root.join("package.json"))?,
        };

        let resolve = |path: Option<PathBuf>, default: &str| {
            fs::absolute(&project_root.join(path.unwrap_or_else(|| PathBuf::from(default))))
        };

        let dist_dir = resolve(self.dist_dir, DEFAULT_DIST_DIR)?;
        let bin_dir = resolve(self.bin_dir, DEFAULT_BIN_DIR)?;
        fs::ensure_not_enclosing(&dist_dir, &project_root)?;
        fs::ensure_not_enclosing(&bin_dir, &project_root)?;

        let sea_config_file = resolve(self.sea_config_file, DEFAULT_SEA_CONFIG_FILE)?;
        let blob_file = match self.blob_file {
            Some(path) => fs::absolute(&project_root.join(path))?,
            None => bin_dir.join(DEFAULT_BLOB_FILE),
        };
        let app_file = bin_dir.join(format!("{}{}", app.name, platform.executable_extension()));

        Ok(PackagerSettings {
            project_root,
            platform,
            app,
            dist_dir,
            bin_dir,
            sea_config_file,
            blob_file,
            app_file,
            build_script: self
                .build_script
                .unwrap_or_else(|| DEFAULT_BUILD_SCRIPT.to_string()),
            required_tools: self
                .required_tools
                .unwrap_or_else(|| vec![PACKAGE_MANAGER.to_string(), RUNTIME.to_string()]),
        })
    }
}
