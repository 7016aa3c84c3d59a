//! `planwise` binary entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    planwise_cli::run().await
}
