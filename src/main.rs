//! placefinder CLI entry point
//!
//! Location screen - terminal shell, one-shot commands and HTTP API

use placefinder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
