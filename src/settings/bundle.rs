//! esbuild configuration for the bundle builder.

use crate::{error::Result, utils::fs};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

pub const DEFAULT_ENTRY_POINT: &str = "src/index.ts";
pub const DEFAULT_OUTFILE: &str = "dist/bundle.js";
pub const DEFAULT_TARGET: &str = "es2020";

/// Options passed to esbuild.
///
/// The defaults produce one minified CommonJS file for Node with every
/// dependency inlined and no sourcemap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleSettings {
    /// Directory esbuild runs in; entry and outfile are relative to it.
    pub project_root: PathBuf,
    pub entry_point: PathBuf,
    pub outfile: PathBuf,
    /// esbuild `--platform`
    pub platform: String,
    /// esbuild `--target`
    pub target: String,
    pub minify: bool,
    pub sourcemap: bool,
    /// Packages left out of the bundle
    pub external: Vec<String>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            entry_point: PathBuf::from(DEFAULT_ENTRY_POINT),
            outfile: PathBuf::from(DEFAULT_OUTFILE),
            platform: "node".to_string(),
            target: DEFAULT_TARGET.to_string(),
            minify: true,
            sourcemap: false,
            external: Vec::new(),
        }
    }
}

impl BundleSettings {
    /// Settings for the project at `root` with default options.
    pub fn for_project<P: AsRef<Path>>(root: P) -> Self {
        Self {
            project_root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Project root resolved against the current directory.
    pub fn absolute_root(&self) -> Result<PathBuf> {
        fs::absolute(&self.project_root)
    }

    /// Absolute path of the output file.
    pub fn outfile_path(&self) -> Result<PathBuf> {
        fs::absolute(&self.absolute_root()?.join(&self.outfile))
    }

    /// Directory removed and recreated before each build.
    ///
    /// Rejected when it is the project root or one of its ancestors.
    pub fn out_dir(&self) -> Result<PathBuf> {
        let root = self.absolute_root()?;
        let out_dir = self
            .outfile_path()?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.clone());
        fs::ensure_not_enclosing(&out_dir, &root)?;
        Ok(out_dir)
    }

    /// Command-line arguments for esbuild.
    pub fn esbuild_args(&self) -> Vec<OsString> {
        let mut args = vec![
            self.entry_point.clone().into_os_string(),
            OsString::from("--bundle"),
            OsString::from(format!("--platform={}", self.platform)),
            OsString::from(format!("--target={}", self.target)),
        ];

        let mut outfile = OsString::from("--outfile=");
        outfile.push(&self.outfile);
        args.push(outfile);

        if self.minify {
            args.push(OsString::from("--minify"));
        }
        if self.sourcemap {
            args.push(OsString::from("--sourcemap"));
        }
        for external in &self.external {
            args.push(OsString::from(format!("--external:{external}")));
        }

        args
    }
}
