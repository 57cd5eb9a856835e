//! Pipeline steps as data: a name, an action and the state it must leave behind.

use crate::{
    error::{PackagerError, Result},
    metadata::load_sea_config,
    output::OutputManager,
    process::{CommandRunner, CommandSpec},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Remove a directory tree; absent is fine.
    RemoveDir(PathBuf),

    /// Remove a directory tree, then create it empty.
    RecreateDir(PathBuf),

    /// Run an external command.
    Run(CommandSpec),

    /// Validate the SEA config, then run the blob generator.
    GenerateBlob {
        sea_config: PathBuf,
        blob_file: PathBuf,
        command: CommandSpec,
    },

    /// Ask the runtime where its executable lives and copy it to `destination`.
    CopyRuntime {
        query: CommandSpec,
        destination: PathBuf,
    },
}

/// Filesystem state a step guarantees once its action returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Postcondition {
    #[default]
    None,
    Absent(PathBuf),
    Directory(PathBuf),
    File(PathBuf),
}

impl Postcondition {
    /// Check the postcondition against the filesystem.
    pub fn check(&self) -> Result<()> {
        let violated = match self {
            Postcondition::None => None,
            Postcondition::Absent(path) => path
                .exists()
                .then(|| format!("{} still exists", path.display())),
            Postcondition::Directory(path) => (!path.is_dir())
                .then(|| format!("expected directory {} was not created", path.display())),
            Postcondition::File(path) => (!path.is_file())
                .then(|| format!("expected file {} was not produced", path.display())),
        };

        match violated {
            Some(reason) => Err(PackagerError::Postcondition { reason }),
            None => Ok(()),
        }
    }
}

/// One named unit of work in a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    name: String,
    action: StepAction,
    postcondition: Postcondition,
    nested: bool,
}

impl Step {
    pub fn new(name: impl Into<String>, action: StepAction) -> Self {
        Self {
            name: name.into(),
            action,
            postcondition: Postcondition::None,
            nested: false,
        }
    }

    /// Require `postcondition` to hold after the action.
    pub fn with_postcondition(mut self, postcondition: Postcondition) -> Self {
        self.postcondition = postcondition;
        self
    }

    /// Mark as a platform sub-step (printed with an extra `>`).
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> &StepAction {
        &self.action
    }

    pub fn postcondition(&self) -> &Postcondition {
        &self.postcondition
    }

    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// Header line printed before the step runs.
    pub fn header(&self) -> String {
        let marker = if self.nested { ">>>" } else { ">>" };
        format!("{marker} {}", self.name)
    }

    /// Run the action, then verify the postcondition.
    pub async fn execute<R: CommandRunner>(&self, runner: &R, output: &OutputManager) -> Result<()> {
        match &self.action {
            StepAction::RemoveDir(path) => fs::remove_dir_all(path).await?,
            StepAction::RecreateDir(path) => fs::create_dir_all(path, true).await?,
            StepAction::Run(command) => {
                runner.run(command).await?;
            }
            StepAction::GenerateBlob {
                sea_config,
                blob_file,
                command,
            } => generate_blob(sea_config, blob_file, command, runner, output).await?,
            StepAction::CopyRuntime { query, destination } => {
                copy_runtime(query, destination, runner, output).await?
            }
        }

        self.postcondition.check()
    }
}

async fn generate_blob<R: CommandRunner>(
    sea_config: &Path,
    blob_file: &Path,
    command: &CommandSpec,
    runner: &R,
    output: &OutputManager,
) -> Result<()> {
    let config = load_sea_config(sea_config)?;

    let cwd = command.get_current_dir().unwrap_or(Path::new("."));
    let configured = config.output_path(cwd);
    if fs::absolute(&configured)? != fs::absolute(blob_file)? {
        log::warn!(
            "{} writes the blob to {}, but {} is injected",
            sea_config.display(),
            configured.display(),
            blob_file.display()
        );
        output.warn(&format!(
            "SEA config output \"{}\" does not match expected blob path {}",
            config.output,
            blob_file.display()
        ))?;
    }

    output.progress("Generating SEA blob...")?;
    runner.run(command).await?;
    output.progress("SEA blob generated successfully.")?;
    Ok(())
}

async fn copy_runtime<R: CommandRunner>(
    query: &CommandSpec,
    destination: &Path,
    runner: &R,
    output: &OutputManager,
) -> Result<()> {
    let reported = runner.run(query).await?;
    let runtime = reported.stdout.trim();
    if runtime.is_empty() {
        return Err(PackagerError::Postcondition {
            reason: format!("{query} did not report an executable path"),
        });
    }

    log::debug!("Runtime executable: {runtime}");
    let bytes = fs::copy_file(Path::new(runtime), destination).await?;
    log::debug!("Copied {bytes} bytes");
    output.progress(&format!("Node binary copied to {}", destination.display()))?;
    Ok(())
}
