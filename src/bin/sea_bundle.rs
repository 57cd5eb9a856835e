//! sea_bundle - bundle a TypeScript project with esbuild.
//!
//! Always terminates through `process::exit` so a bundler that leaves work
//! behind cannot keep the process alive.

use node_sea_bundler::cli::{self, BundleArgs};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let exit_code = match cli::bundle(BundleArgs::parse_args()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Build failed: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
