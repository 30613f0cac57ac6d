use clap::Parser;
use n8n_relay::core::config::RelayConfig;
use n8n_relay::{cli, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = cli::Args::parse();
    logging::init(&args.log_level)?;

    let config = RelayConfig::from_env()?;
    server::serve(config, &args.bind, args.assets_dir).await?;
    Ok(())
}
