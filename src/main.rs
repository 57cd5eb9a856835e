//! sea_compile - package a Node project as a single executable application.
//!
//! Runs preflight checks, then the packaging pipeline. Any failure exits
//! with code 1; success returns normally.

use node_sea_bundler::cli::{self, CompileArgs};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::compile(CompileArgs::parse_args()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("An unexpected error occurred: {}", e);
            1
        }
    };

    if exit_code != 0 {
        process::exit(exit_code);
    }
}
