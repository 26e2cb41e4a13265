use anyhow::Result;
use clap::Parser;
use lexigo_lib::api::cli::Cli;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` when set and valid, otherwise `info`
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    lexigo_lib::run(cli).await?;
    Ok(())
}
