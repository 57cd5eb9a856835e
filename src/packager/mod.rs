//! Executable packager: preflight checks, then the packaging pipeline.
//!
//! Preflight never touches the filesystem. Only once every required tool
//! has been found does the pipeline start deleting and creating directories.

use crate::{
    error::{ErrorExt, Result},
    output::OutputManager,
    pipeline::{Pipeline, build_pipeline},
    process::{CommandRunner, Toolchain, detect_tools},
    settings::PackagerSettings,
    utils::checksum::calculate_sha256,
};
use std::path::PathBuf;

/// The executable produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// Final executable
    pub path: PathBuf,
    /// Preparation blob injected into it
    pub blob: PathBuf,
    /// Size of the executable in bytes
    pub size: u64,
    /// Hex SHA-256 of the executable
    pub checksum: String,
}

/// Drives preflight and the packaging pipeline for one project.
#[derive(Debug)]
pub struct Packager<R> {
    settings: PackagerSettings,
    runner: R,
    output: OutputManager,
}

impl<R: CommandRunner> Packager<R> {
    pub fn new(settings: PackagerSettings, runner: R, output: OutputManager) -> Self {
        Self {
            settings,
            runner,
            output,
        }
    }

    pub fn settings(&self) -> &PackagerSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Locate required tools and the platform's signing tools.
    pub async fn preflight(&self) -> Result<Toolchain> {
        let toolchain = detect_tools(
            self.settings.required_tools(),
            &self.settings.platform_tools(),
            &self.runner,
            &self.output,
        )
        .await?;

        self.output.progress(&format!(
            "Platform detected: {}",
            self.settings.platform()
        ))?;
        self.output.progress(&format!(
            "File will be located at {}",
            self.settings.app_file().display()
        ))?;

        Ok(toolchain)
    }

    /// The step sequence for this project and platform.
    pub fn pipeline(&self, toolchain: &Toolchain) -> Pipeline {
        build_pipeline(&self.settings, toolchain)
    }

    /// Run `pipeline` and describe the resulting executable.
    pub async fn execute(&self, pipeline: &mut Pipeline) -> Result<PackagedArtifact> {
        pipeline.run(&self.runner, &self.output).await?;

        let path = self.settings.app_file().to_path_buf();
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        Ok(PackagedArtifact {
            path,
            blob: self.settings.blob_file().to_path_buf(),
            size,
            checksum,
        })
    }
}
