use flashloan_deployer::{
    artifact::ContractArtifact,
    config::DeployConfig,
    network::RpcNetwork,
    FlashLoanDeployer,
};

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let config = DeployConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!(?config, "Starting deployment");

    let artifact = ContractArtifact::load(&config.artifacts_dir, &config.contract)
        .with_context(|| format!("Failed to load artifact {}", config.contract))?;

    let network = RpcNetwork::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}", config.rpc_url))?;

    FlashLoanDeployer::new(network).run(&artifact).await?;

    Ok(())
}
