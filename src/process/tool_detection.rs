//! External tool detection and availability checking.
//!
//! Tools are resolved on PATH once during preflight. Tools that understand
//! `--version` must also report one, which catches broken shims early.

use super::{CommandRunner, CommandSpec};
use crate::{
    error::{PackagerError, Result},
    output::OutputManager,
};
use std::path::{Path, PathBuf};

/// A resolved external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Name the tool was looked up by
    pub name: String,
    /// Absolute path the tool resolved to
    pub path: PathBuf,
    /// Reported version, when the tool was asked for one
    pub version: Option<String>,
}

impl Tool {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            version: None,
        }
    }
}

/// The set of tools found during preflight.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    tools: Vec<Tool>,
}

impl Toolchain {
    pub fn from_tools(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Resolved path of `name`, if it was part of preflight.
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.path.as_path())
    }

    /// Program to invoke for `name`: the resolved path, or the bare name so
    /// the OS lookup applies when the tool was not part of preflight.
    pub fn program(&self, name: &str) -> PathBuf {
        self.path(name)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

/// Find `name` on PATH.
pub fn locate_tool(name: &str) -> Result<PathBuf> {
    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", name, e);
            Err(PackagerError::MissingTool {
                tool: name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Resolve every tool in `versioned` (which must answer `--version`) and
/// every tool in `present` (which only has to exist on PATH).
///
/// Stops at the first missing tool.
pub async fn detect_tools<R: CommandRunner>(
    versioned: &[String],
    present: &[String],
    runner: &R,
    output: &OutputManager,
) -> Result<Toolchain> {
    let mut tools = Vec::with_capacity(versioned.len() + present.len());

    for name in versioned {
        let path = locate_tool(name)?;
        let version = runner
            .run(&CommandSpec::new(&path).arg("--version"))
            .await
            .map_err(|e| PackagerError::MissingTool {
                tool: name.clone(),
                reason: format!("failed to report a version: {e}"),
            })?;
        let version = version.stdout.trim().to_string();
        output.progress(&format!("{name} version: {version}"))?;
        tools.push(Tool {
            name: name.clone(),
            path,
            version: Some(version),
        });
    }

    for name in present {
        let path = locate_tool(name)?;
        output.verbose(&format!("{name} found at {}", path.display()))?;
        tools.push(Tool::new(name.clone(), path));
    }

    Ok(Toolchain::from_tools(tools))
}
