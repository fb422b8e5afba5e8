use clap::Parser;
use server_data_gateway::{Args, server};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // parse cli arguments
    let args = Args::parse();

    if let Err(e) = server::run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
