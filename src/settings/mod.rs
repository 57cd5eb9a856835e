//! Configuration structures for bundling and packaging.
//!
//! Both entry points build their settings once at startup and pass them by
//! reference; nothing here is mutated afterwards.

mod builder;
mod bundle;
mod packager;
mod platform;

pub use builder::SettingsBuilder;
pub use bundle::{BundleSettings, DEFAULT_ENTRY_POINT, DEFAULT_OUTFILE, DEFAULT_TARGET};
pub use packager::{
    DEFAULT_BIN_DIR, DEFAULT_BLOB_FILE, DEFAULT_BUILD_SCRIPT, DEFAULT_DIST_DIR,
    DEFAULT_SEA_CONFIG_FILE, MACHO_SEGMENT_NAME, PACKAGE_MANAGER, PackagerSettings, RUNTIME,
    SEA_RESOURCE_NAME, SENTINEL_FUSE,
};
pub use platform::Platform;
