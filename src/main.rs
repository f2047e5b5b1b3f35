use clap::Parser;
use std::process;

mod cli;

fn main() {
    // Initialize tracing (use RUST_LOG env var to control output)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}
