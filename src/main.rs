//! CLI entry point for the tile assembler and pattern scanner

use clap::Parser;
use tilestitch::io::cli::{Cli, FileProcessor};

fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    if cli.trace {
        init_tracing();
    }

    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Allow print for telling the user why tracing is unavailable
#[cfg(not(feature = "tracing"))]
#[allow(clippy::print_stderr)]
fn init_tracing() {
    eprintln!("Tracing output requires building with the `tracing` feature");
}
