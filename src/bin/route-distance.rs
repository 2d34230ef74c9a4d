use std::process::ExitCode;

use clap::Parser;
use route_distance::cli::{self, Args};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_tracing();
    cli::run(args).await
}
