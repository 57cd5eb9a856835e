//! The packaging step sequence: a fixed common prefix followed by the
//! platform's signing and injection steps.

use super::{Pipeline, Postcondition, Step, StepAction};
use crate::{
    process::{CommandSpec, Toolchain},
    settings::{
        MACHO_SEGMENT_NAME, PACKAGE_MANAGER, PackagerSettings, Platform, RUNTIME,
        SEA_RESOURCE_NAME, SENTINEL_FUSE,
    },
};
use std::collections::HashMap;

/// Platform-specific step suffixes.
///
/// A platform without an entry contributes no steps.
#[derive(Debug, Clone, Default)]
pub struct PlatformStepTable {
    steps: HashMap<Platform, Vec<Step>>,
}

impl PlatformStepTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, platform: Platform, steps: Vec<Step>) {
        self.steps.insert(platform, steps);
    }

    /// Steps for `platform`; empty when the table has no entry.
    pub fn steps_for(&self, platform: Platform) -> &[Step] {
        self.steps.get(&platform).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Take the steps for `platform` out of the table.
    pub fn into_steps(mut self, platform: Platform) -> Vec<Step> {
        self.steps.remove(&platform).unwrap_or_default()
    }

    /// Signing and injection steps for every supported platform.
    pub fn standard(settings: &PackagerSettings, toolchain: &Toolchain) -> Self {
        let app = settings.app_file();
        let root = settings.project_root();

        let command = |program: &str| {
            CommandSpec::new(toolchain.program(program))
                .current_dir(root)
                .streamed()
        };
        let inject = |macho_segment: bool| {
            let mut postject = command(PACKAGE_MANAGER)
                .arg("postject")
                .arg(app)
                .arg(SEA_RESOURCE_NAME)
                .arg(settings.blob_file())
                .args(["--sentinel-fuse", SENTINEL_FUSE]);
            if macho_segment {
                postject = postject.args(["--macho-segment-name", MACHO_SEGMENT_NAME]);
            }
            Step::new("Inject SEA blob", StepAction::Run(postject)).nested()
        };

        let mut table = Self::new();
        table.insert(
            Platform::Darwin,
            vec![
                Step::new(
                    "Remove signature",
                    StepAction::Run(command("codesign").arg("--remove-signature").arg(app)),
                )
                .nested(),
                inject(true),
                Step::new(
                    "Sign binary",
                    StepAction::Run(command("codesign").args(["--sign", "-"]).arg(app)),
                )
                .nested(),
            ],
        );
        table.insert(Platform::Linux, vec![inject(false)]);
        table.insert(
            Platform::Win32,
            vec![
                Step::new(
                    "Remove signature",
                    StepAction::Run(command("signtool").args(["remove", "/s"]).arg(app)),
                )
                .nested(),
                inject(false),
                Step::new(
                    "Sign binary",
                    StepAction::Run(command("signtool").args(["sign", "/fd", "SHA256"]).arg(app)),
                )
                .nested(),
            ],
        );
        table
    }
}

/// Platform-independent steps, in order: clean dist, build, recreate bin,
/// generate the blob, copy the runtime.
pub fn common_steps(settings: &PackagerSettings, toolchain: &Toolchain) -> Vec<Step> {
    let root = settings.project_root();
    let pnpm = toolchain.program(PACKAGE_MANAGER);
    let node = toolchain.program(RUNTIME);

    vec![
        Step::new(
            "Clean up dist directory",
            StepAction::RemoveDir(settings.dist_dir().to_path_buf()),
        )
        .with_postcondition(Postcondition::Absent(settings.dist_dir().to_path_buf())),
        Step::new(
            "Build project",
            StepAction::Run(
                CommandSpec::new(&pnpm)
                    .args(["run", settings.build_script()])
                    .current_dir(root)
                    .streamed(),
            ),
        ),
        Step::new(
            "Create bin directory if needed",
            StepAction::RecreateDir(settings.bin_dir().to_path_buf()),
        )
        .with_postcondition(Postcondition::Directory(settings.bin_dir().to_path_buf())),
        Step::new(
            "Generate SEA blob",
            StepAction::GenerateBlob {
                sea_config: settings.sea_config_file().to_path_buf(),
                blob_file: settings.blob_file().to_path_buf(),
                command: CommandSpec::new(&node)
                    .arg("--experimental-sea-config")
                    .arg(settings.sea_config_file())
                    .current_dir(root),
            },
        )
        .with_postcondition(Postcondition::File(settings.blob_file().to_path_buf())),
        Step::new(
            "Copy Node binary",
            StepAction::CopyRuntime {
                query: CommandSpec::new(&node)
                    .args(["-p", "process.execPath"])
                    .current_dir(root),
                destination: settings.app_file().to_path_buf(),
            },
        )
        .with_postcondition(Postcondition::File(settings.app_file().to_path_buf())),
    ]
}

/// Common steps followed by the standard suffix for the configured platform.
pub fn build_pipeline(settings: &PackagerSettings, toolchain: &Toolchain) -> Pipeline {
    let mut steps = common_steps(settings, toolchain);
    steps.extend(PlatformStepTable::standard(settings, toolchain).into_steps(settings.platform()));
    Pipeline::new(steps)
}
