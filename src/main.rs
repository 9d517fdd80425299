//! Binary entry point: parses CLI arguments, runs one text comparison, and
//! maps library errors to a process exit code via `anyhow`, mirroring the
//! teacher's `main.rs` / `cli::args` split (parse, then dispatch).

use clap::Parser;

use elsim::cli::args::Args;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Err(err) = elsim::cli::run(args, std::io::stdout()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
