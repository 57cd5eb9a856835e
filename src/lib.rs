//! Build orchestration for Node single executable applications.
//!
//! This library provides the two halves of shipping a TypeScript project as
//! one native executable:
//! - [`bundle`]: clean `dist/` and bundle the sources with esbuild
//! - [`packager`]: preflight the toolchain, then run a fail-fast
//!   [`pipeline`] that generates the SEA blob, copies the node binary and
//!   injects/signs it for darwin, linux or win32
//!
//! External tools are reached only through [`process::CommandRunner`], so
//! everything here can be driven by a fake runner in tests.

pub mod bundle;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod output;
pub mod packager;
pub mod pipeline;
pub mod process;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorExt, PackagerError, Result};
pub use packager::{PackagedArtifact, Packager};
pub use pipeline::{Pipeline, PipelineState};
pub use settings::{PackagerSettings, Platform, SettingsBuilder};
