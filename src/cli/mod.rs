//! Command line entry points for the two binaries.
//!
//! Each returns the process exit code; the binaries decide how to exit.

mod args;

pub use crate::output::OutputManager;
pub use args::{BundleArgs, CompileArgs};

use crate::{
    bundle::{build_bundle, locate_esbuild},
    error::{PackagerError, Result},
    packager::Packager,
    process::SystemRunner,
    settings::Platform,
};

/// Print `message` to stderr and return the failure exit code.
pub fn exit_with_error(output: &OutputManager, message: &str) -> Result<i32> {
    output.error(message)?;
    Ok(1)
}

/// Bundle builder entry point.
pub async fn bundle(args: BundleArgs) -> Result<i32> {
    let output = OutputManager::new(false, false);
    let settings = args.bundle_settings();
    let runner = SystemRunner::new(output.clone());

    let result = match locate_esbuild(&settings.project_root) {
        Ok(esbuild) => build_bundle(&settings, &esbuild, &runner, &output).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outfile) => {
            log::info!("Bundle written to {}", outfile.display());
            output.success("Build completed successfully")?;
            Ok(0)
        }
        Err(e) => exit_with_error(&output, &format!("Build failed: {e}")),
    }
}

/// Executable packager entry point.
pub async fn compile(args: CompileArgs) -> Result<i32> {
    let output = OutputManager::new(args.verbose, false);
    output.progress("Starting binary compilation script")?;

    let platform = match Platform::from_identifier(&args.platform_identifier()) {
        Ok(platform) => platform,
        Err(e) => return exit_with_error(&output, &e.to_string()),
    };

    let settings = match args.settings_builder(platform).build() {
        Ok(settings) => settings,
        Err(e) => return exit_with_error(&output, &e.to_string()),
    };

    let packager = Packager::new(settings, SystemRunner::new(output.clone()), output.clone());

    let toolchain = match packager.preflight().await {
        Ok(toolchain) => toolchain,
        Err(e @ PackagerError::MissingTool { .. }) => {
            return exit_with_error(
                &output,
                &format!(
                    "{e}\nOne or more required tools are missing. Please ensure you have pnpm and node installed."
                ),
            );
        }
        Err(e) => return exit_with_error(&output, &e.to_string()),
    };

    let mut pipeline = packager.pipeline(&toolchain);
    match packager.execute(&mut pipeline).await {
        Ok(artifact) => {
            output.success("\nBinary compilation completed successfully!")?;
            output.indent(&format!("Executable: {}", artifact.path.display()))?;
            output.indent(&format!("Size: {} bytes", artifact.size))?;
            output.indent(&format!("SHA256: {}", artifact.checksum))?;
            Ok(0)
        }
        Err(e) => exit_with_error(
            &output,
            &format!("An error occurred during the compilation process:\n{e}"),
        ),
    }
}
