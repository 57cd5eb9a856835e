//! Fail-fast execution of an ordered list of steps.
//!
//! A [`Pipeline`] moves `Pending -> Running(0) -> ... -> Running(n-1) ->
//! Succeeded`. The first failing step moves it to `Failed` and no later step
//! runs. Completed steps are not rolled back.

mod plan;
mod step;

pub use plan::{PlatformStepTable, build_pipeline, common_steps};
pub use step::{Postcondition, Step, StepAction};

use crate::{
    error::{PackagerError, Result},
    output::OutputManager,
    process::CommandRunner,
};

/// Execution state of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    /// Index of the step currently executing
    Running(usize),
    Succeeded,
    /// Index of the step that failed
    Failed { step: usize },
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed { .. })
    }
}

/// Ordered steps plus the state of their execution.
#[derive(Debug)]
pub struct Pipeline {
    steps: Vec<Step>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            state: PipelineState::Pending,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Execute every step in order, stopping at the first failure.
    ///
    /// The returned error is [`PackagerError::Step`] naming the failed step.
    /// A pipeline runs at most once.
    pub async fn run<R: CommandRunner>(&mut self, runner: &R, output: &OutputManager) -> Result<()> {
        if self.state != PipelineState::Pending {
            return Err(PackagerError::PipelineAlreadyRun);
        }

        let total = self.steps.len();
        for (index, step) in self.steps.iter().enumerate() {
            self.state = PipelineState::Running(index);
            log::info!("Step {}/{}: {}", index + 1, total, step.name());

            let result = async {
                output.section(&format!("Step {}/{}:", index + 1, total))?;
                output.progress(&step.header())?;
                step.execute(runner, output).await
            }
            .await;

            if let Err(e) = result {
                log::debug!("Step {} failed: {}", step.name(), e);
                self.state = PipelineState::Failed { step: index };
                return Err(PackagerError::Step {
                    step: step.name().to_string(),
                    source: Box::new(e),
                });
            }
        }

        self.state = PipelineState::Succeeded;
        Ok(())
    }
}
