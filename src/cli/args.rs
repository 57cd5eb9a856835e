//! Command line argument parsing.
//!
//! Both binaries work with no arguments at all; every flag overrides one
//! piece of the conventional project layout.

use crate::settings::{
    BundleSettings, DEFAULT_BIN_DIR, DEFAULT_BUILD_SCRIPT, DEFAULT_ENTRY_POINT, DEFAULT_OUTFILE,
    DEFAULT_SEA_CONFIG_FILE, DEFAULT_TARGET, Platform, SettingsBuilder,
};
use clap::Parser;
use std::path::PathBuf;

/// Bundle a TypeScript project into a single minified file with esbuild
#[derive(Parser, Debug)]
#[command(
    name = "sea_bundle",
    version,
    about = "Bundle a TypeScript project into a single minified file with esbuild",
    long_about = "Removes the output directory, then bundles the entry point and all of its
dependencies into one minified file for Node (no sourcemap, no externals).

Exit code 0 = bundle written, 1 = build failed."
)]
pub struct BundleArgs {
    /// Project directory (contains node_modules and the entry point)
    #[arg(long, env = "SEA_PROJECT_DIR", default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Entry point, relative to the project directory
    #[arg(long, default_value = DEFAULT_ENTRY_POINT, value_name = "FILE")]
    pub entry: PathBuf,

    /// Output file, relative to the project directory
    #[arg(long, default_value = DEFAULT_OUTFILE, value_name = "FILE")]
    pub outfile: PathBuf,

    /// esbuild language target
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,
}

impl BundleArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn bundle_settings(&self) -> BundleSettings {
        BundleSettings {
            entry_point: self.entry.clone(),
            outfile: self.outfile.clone(),
            target: self.target.clone(),
            ..BundleSettings::for_project(&self.project_dir)
        }
    }
}

/// Package the project as a Node single executable application
#[derive(Parser, Debug)]
#[command(
    name = "sea_compile",
    version,
    about = "Package the project as a Node single executable application",
    long_about = "Builds the project, generates a SEA blob from sea-config.json, copies the node
binary and injects the blob with postject, stripping and re-applying code
signatures on macOS and Windows.

Exit code 0 = executable written to the bin directory, 1 = any failure."
)]
pub struct CompileArgs {
    /// Project directory (contains package.json and sea-config.json)
    #[arg(long, env = "SEA_PROJECT_DIR", default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Platform identifier (darwin, linux, win32); detected when omitted
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Package script that bundles the project
    #[arg(long, default_value = DEFAULT_BUILD_SCRIPT, value_name = "SCRIPT")]
    pub build_script: String,

    /// Output directory for the blob and the executable
    #[arg(long, default_value = DEFAULT_BIN_DIR, value_name = "DIR")]
    pub bin_dir: PathBuf,

    /// SEA configuration file
    #[arg(long, default_value = DEFAULT_SEA_CONFIG_FILE, value_name = "FILE")]
    pub sea_config: PathBuf,

    /// Print tool locations and other detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl CompileArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Requested platform, or the host's when none was given.
    pub fn platform_identifier(&self) -> String {
        self.platform
            .clone()
            .unwrap_or_else(|| Platform::host_identifier().to_string())
    }

    /// Settings builder preloaded with these arguments.
    pub fn settings_builder(&self, platform: Platform) -> SettingsBuilder {
        SettingsBuilder::new()
            .project_root(&self.project_dir)
            .platform(platform)
            .build_script(self.build_script.clone())
            .bin_dir(&self.bin_dir)
            .sea_config_file(&self.sea_config)
    }
}
