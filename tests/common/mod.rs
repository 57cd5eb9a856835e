//! Shared fixtures: a recording fake runner and throwaway Node projects.

#![allow(dead_code)]

use node_sea_bundler::{
    PackagerError, Result,
    process::{CommandOutput, CommandRunner, CommandSpec, Tool, Toolchain},
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

type Handler = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync>;

/// Records every command and answers through a handler closure.
pub struct FakeRunner {
    calls: Mutex<Vec<CommandSpec>>,
    handler: Handler,
}

impl FakeRunner {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Runner where every command succeeds with empty output.
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(CommandOutput::default()))
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Each call rendered as `program arg arg...`.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.command_lines().iter().any(|line| line.contains(needle))
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(command.clone());
        (self.handler)(command)
    }
}

pub fn command_failed(command: &CommandSpec, stderr: &str) -> PackagerError {
    PackagerError::CommandFailed {
        command: command.to_string(),
        status: "exit status: 1".to_string(),
        stderr: stderr.to_string(),
    }
}

/// pnpm and node resolved to their bare names.
pub fn fake_toolchain() -> Toolchain {
    Toolchain::from_tools(vec![Tool::new("pnpm", "pnpm"), Tool::new("node", "node")])
}

/// Node project with `package.json` and, optionally, `sea-config.json`.
pub fn node_project(root: &Path, name: &str, with_sea_config: bool) {
    fs::write(
        root.join("package.json"),
        format!(r#"{{ "name": "{name}", "version": "1.2.3", "scripts": {{ "build:ts": "node build.js" }} }}"#),
    )
    .unwrap();
    if with_sea_config {
        fs::write(
            root.join("sea-config.json"),
            r#"{ "main": "dist/bundle.js", "output": "bin/sea-prep.blob", "disableExperimentalSEAWarning": true }"#,
        )
        .unwrap();
    }
}

/// Stand-in for the node executable that gets copied.
pub fn fake_node_binary(dir: &Path) -> PathBuf {
    let path = dir.join("node-runtime");
    fs::write(&path, b"\x7fELF fake node runtime").unwrap();
    path
}

/// Runner that behaves like a healthy toolchain for the project at `root`:
/// the build writes `dist/bundle.js`, node writes the blob and reports
/// `runtime` as its executable, everything else succeeds.
pub fn healthy_runner(root: &Path, runtime: &Path) -> FakeRunner {
    let root = root.to_path_buf();
    let runtime = runtime.to_path_buf();
    FakeRunner::new(move |command| {
        let args = command.args_lossy();
        match args.first().map(String::as_str) {
            Some("run") => {
                fs::create_dir_all(root.join("dist")).unwrap();
                fs::write(root.join("dist/bundle.js"), "console.log('hi')").unwrap();
                Ok(CommandOutput::default())
            }
            Some("--experimental-sea-config") => {
                fs::write(root.join("bin/sea-prep.blob"), b"blob").unwrap();
                Ok(CommandOutput::default())
            }
            Some("-p") => Ok(CommandOutput::with_stdout(format!(
                "{}\n",
                runtime.display()
            ))),
            _ => Ok(CommandOutput::default()),
        }
    })
}
