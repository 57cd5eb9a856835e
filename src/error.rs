//! Error types for bundling and packaging operations.
//!
//! Every failure is terminal for the run. Variants carry enough context
//! (tool name, step name, path, underlying tool output) for the final
//! user-facing message.

use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// A required external tool is not on PATH or could not report its version
    #[error("Required tool \"{tool}\" is not installed or not found in PATH: {reason}")]
    MissingTool {
        /// Tool name as looked up on PATH
        tool: String,
        /// Why the tool was rejected
        reason: String,
    },

    /// The detected (or requested) platform is not one we can package for
    #[error("Unsupported platform: {platform}. Supported platforms are: darwin, linux, win32.")]
    UnsupportedPlatform {
        /// Raw platform identifier
        platform: String,
    },

    /// The SEA configuration file does not exist
    #[error(
        "The \"{}\" file is missing. Please ensure it is present in the current directory.",
        path.display()
    )]
    MissingSeaConfig {
        /// Expected location of the config file
        path: PathBuf,
    },

    /// The SEA configuration file exists but is not usable
    #[error("Invalid SEA config {}: {reason}", path.display())]
    SeaConfig {
        /// Location of the config file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// `package.json` is missing or lacks a usable name
    #[error("Invalid package metadata in {}: {reason}", path.display())]
    Metadata {
        /// Location of the metadata file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// An external command could not be started
    #[error("Failed to execute {command}: {source}")]
    CommandSpawn {
        /// Command line that failed to start
        command: String,
        /// Underlying spawn error
        #[source]
        source: io::Error,
    },

    /// An external command ran but exited unsuccessfully
    #[error("{command} exited with {status}{}", format_stderr(stderr))]
    CommandFailed {
        /// Command line that failed
        command: String,
        /// Exit status description
        status: String,
        /// Captured stderr, trimmed
        stderr: String,
    },

    /// A filesystem operation failed
    #[error("{context} ({}): {source}", path.display())]
    Fs {
        /// Operation being performed
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// An output directory that would be erased contains the project itself
    #[error(
        "Refusing to erase {}: it contains the project directory {}",
        path.display(),
        root.display()
    )]
    UnsafeOutputDir {
        /// Directory that would be erased
        path: PathBuf,
        /// Project directory
        root: PathBuf,
    },

    /// A step completed but left the filesystem in an unexpected state
    #[error("{reason}")]
    Postcondition {
        /// Description of the violated expectation
        reason: String,
    },

    /// A pipeline step failed; wraps the cause with the step name
    #[error("Step \"{step}\" failed: {source}")]
    Step {
        /// Step name
        step: String,
        /// Cause of the failure
        #[source]
        source: Box<PackagerError>,
    },

    /// A pipeline was asked to run a second time
    #[error("Pipeline has already been run")]
    PipelineAlreadyRun,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl PackagerError {
    /// Name of the failed step, if this error came out of the pipeline.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Self::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Attach operation and path context to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`PackagerError::Fs`] describing what was being done.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| PackagerError::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
