//! Bundle builder: clean the output directory and run esbuild once.

use crate::{
    error::{PackagerError, Result},
    output::OutputManager,
    process::{CommandRunner, CommandSpec, locate_tool},
    settings::BundleSettings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Find esbuild: the project's local install first, then PATH.
///
/// The returned path is absolute so it stays valid once esbuild runs inside
/// the project directory.
pub fn locate_esbuild(project_root: &Path) -> Result<PathBuf> {
    let binary = if cfg!(windows) { "esbuild.cmd" } else { "esbuild" };
    let local = fs::absolute(&project_root.join("node_modules").join(".bin").join(binary))?;
    if local.is_file() {
        log::debug!("Using project esbuild: {}", local.display());
        return Ok(local);
    }
    locate_tool("esbuild")
}

/// esbuild invocation for `settings`.
pub fn esbuild_command(settings: &BundleSettings, esbuild: &Path) -> CommandSpec {
    CommandSpec::new(esbuild)
        .args(settings.esbuild_args())
        .current_dir(&settings.project_root)
        .streamed()
}

/// Remove any previous output, then bundle.
///
/// Each run deletes the whole output directory first, so two runs over the
/// same sources leave identical contents. An output directory that contains
/// the project is refused before anything is deleted. Returns the absolute
/// output file path.
pub async fn build_bundle<R: CommandRunner>(
    settings: &BundleSettings,
    esbuild: &Path,
    runner: &R,
    output: &OutputManager,
) -> Result<PathBuf> {
    let out_dir = settings.out_dir()?;
    if out_dir.exists() {
        output.progress(&format!(
            "Removing existing {} directory...",
            out_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| out_dir.display().to_string())
        ))?;
    }
    fs::create_dir_all(&out_dir, true).await?;

    output.progress("Building TypeScript project...")?;
    let command = esbuild_command(settings, esbuild);
    log::info!("Bundling {}", settings.entry_point.display());
    runner.run(&command).await?;

    let outfile = settings.outfile_path()?;
    if !outfile.is_file() {
        return Err(PackagerError::Postcondition {
            reason: format!("esbuild did not produce {}", outfile.display()),
        });
    }

    Ok(outfile)
}
