use clap::Parser;
use std::{
    fmt,
    path::PathBuf,
};

/// Network, account and artifact settings for a single deployment run.
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
pub struct DeployConfig {
    /// JSON-RPC endpoint of the target network.
    #[arg(long, env = "RPC_URL", default_value = "http://127.0.0.1:8545")]
    pub rpc_url: String,
    /// Hex encoded private key of the deploying account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
    /// Directory holding the compiled contract artifacts.
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "build/contracts")]
    pub artifacts_dir: PathBuf,
    /// Name of the contract artifact to deploy.
    #[arg(long, env = "CONTRACT_NAME", default_value = "UnilendFlashLoanCore")]
    pub contract: String,
    /// If set, the endpoint must report this chain id before anything is sent.
    #[arg(long, env = "CHAIN_ID")]
    pub chain_id: Option<u64>,
    /// Number of confirmations to wait for on each transaction.
    #[arg(
        long,
        env = "CONFIRMATIONS",
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("artifacts_dir", &self.artifacts_dir)
            .field("contract", &self.contract)
            .field("chain_id", &self.chain_id)
            .field("confirmations", &self.confirmations)
            .finish()
    }
}
