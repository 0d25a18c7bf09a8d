use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use marinelayer_core::cli::{run, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    // logg til stderr så stdout bare har resultatet; RUST_LOG overstyrer
    let default_level = if args.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    run(&args)?;
    Ok(())
}
