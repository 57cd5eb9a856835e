//! External command execution.
//!
//! Every external tool (esbuild, pnpm, node, postject, codesign, signtool)
//! is described by a [`CommandSpec`] and executed through a [`CommandRunner`].
//! [`SystemRunner`] spawns real processes; tests substitute their own runner.

mod tool_detection;

pub use tool_detection::{Tool, Toolchain, detect_tools, locate_tool};

use crate::{
    error::{PackagerError, Result},
    output::OutputManager,
};
use std::{
    ffi::{OsStr, OsString},
    fmt,
    future::Future,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Description of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    stream: bool,
}

impl CommandSpec {
    /// Creates a command for the given program with no arguments.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            current_dir: None,
            stream: false,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Echo output live instead of capturing it silently.
    pub fn streamed(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn is_streamed(&self) -> bool {
        self.stream
    }

    /// Arguments as lossy UTF-8, convenient for matching in tests and logs.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// File name of the program without directory or extension (`pnpm`, `node`).
    pub fn program_name(&self) -> String {
        Path::new(&self.program)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.to_string_lossy().into_owned())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Output with the given stdout and empty stderr.
    pub fn with_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs a named external command, captures its output and surfaces failure.
///
/// A non-zero exit status must be reported as [`PackagerError::CommandFailed`].
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    output: OutputManager,
}

impl SystemRunner {
    /// Creates a runner that echoes streamed output through `output`.
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        log::debug!("Running: {command}");

        let mut cmd = tokio::process::Command::new(command.program());
        cmd.args(command.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = command.get_current_dir() {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| PackagerError::CommandSpawn {
            command: command.to_string(),
            source,
        })?;

        // Drain both pipes together so a chatty tool cannot block on a full pipe.
        let stream = command.is_streamed();
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let echo = stream.then_some(&self.output);
        let ((stdout, stdout_echo), (stderr, stderr_echo)) =
            tokio::join!(drain(stdout_pipe, echo), drain(stderr_pipe, echo));

        let status = child
            .wait()
            .await
            .map_err(|source| PackagerError::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(PackagerError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        stdout_echo.and(stderr_echo)?;
        Ok(CommandOutput { stdout, stderr })
    }
}

/// Read `pipe` to the end, echoing each line through `echo` when given.
///
/// Reading continues after a failed echo so the child never stalls on a full
/// pipe. The first failure is returned next to the captured text.
async fn drain<P>(pipe: Option<P>, echo: Option<&OutputManager>) -> (String, io::Result<()>)
where
    P: AsyncRead + Unpin,
{
    let mut captured = String::new();
    let mut result = Ok(());
    let Some(pipe) = pipe else {
        return (captured, result);
    };

    let mut lines = BufReader::new(pipe).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let (Some(output), Ok(())) = (echo, &result) {
                    result = output.indent(&line);
                }
                captured.push_str(&line);
                captured.push('\n');
            }
            Ok(None) => break,
            Err(e) => {
                if result.is_ok() {
                    result = Err(e);
                }
                break;
            }
        }
    }
    (captured, result)
}
