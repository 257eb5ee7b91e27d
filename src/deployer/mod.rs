mod state;
pub use state::DeploymentState;

use crate::{
    artifact::ContractArtifact,
    bindings::create_donation_contract_calldata,
    error::DeployError,
    network::Network,
    primitives::{
        DeployedInstance,
        DeploymentOutcome,
        TxHash,
    },
};

use tracing::{
    error,
    info,
    instrument,
};

/// Deploys FlashLoanCore and calls `createDonationContract()` on the new instance.
///
/// Both steps wait for confirmation and run strictly in order. Nothing is retried, and a
/// failed initialization leaves the deployed instance in place.
#[derive(Debug)]
pub struct FlashLoanDeployer<N> {
    network: N,
    state: DeploymentState,
}

impl<N: Network> FlashLoanDeployer<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            state: DeploymentState::NotDeployed,
        }
    }

    pub fn state(&self) -> &DeploymentState {
        &self.state
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    /// Runs the deployment followed by the initialization call.
    /// A deployer runs once; later calls fail with [`DeployError::AlreadyStarted`].
    #[instrument(skip_all, fields(contract = %artifact.name))]
    pub async fn run(
        &mut self,
        artifact: &ContractArtifact,
    ) -> Result<DeploymentOutcome, DeployError> {
        if self.state != DeploymentState::NotDeployed {
            return Err(DeployError::AlreadyStarted(self.state));
        }

        let instance = self.deploy(artifact).await?;
        let init_tx_hash = self.initialize(&instance).await?;

        Ok(DeploymentOutcome {
            instance,
            init_tx_hash,
        })
    }

    async fn deploy(
        &mut self,
        artifact: &ContractArtifact,
    ) -> Result<DeployedInstance, DeployError> {
        let instance = match self.network.deploy(artifact).await {
            Ok(instance) => instance,
            Err(source) => {
                error!(err = ?source, "Deployment failed");
                self.state = DeploymentState::Failed(None);
                return Err(DeployError::Deployment {
                    contract: artifact.name.clone(),
                    source,
                });
            }
        };

        self.state = DeploymentState::Deployed(instance);
        info!(
            address = %instance.address,
            tx_hash = %instance.tx_hash,
            "Unilend FlashLoanCore deployment done: {}",
            instance.address
        );

        Ok(instance)
    }

    async fn initialize(&mut self, instance: &DeployedInstance) -> Result<TxHash, DeployError> {
        let calldata = create_donation_contract_calldata();

        let tx_hash = match self.network.call(instance.address, calldata).await {
            Ok(tx_hash) => tx_hash,
            Err(source) => {
                error!(
                    err = ?source,
                    address = %instance.address,
                    "Initialization failed, instance left uninitialized"
                );
                self.state = DeploymentState::Failed(Some(*instance));
                return Err(DeployError::Initialization {
                    address: instance.address,
                    source,
                });
            }
        };

        self.state = DeploymentState::Initialized(*instance);
        info!(%tx_hash, "Unilend FlashLoanCore Donation Contract Created");

        Ok(tx_hash)
    }
}
