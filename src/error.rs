use crate::{
    deployer::DeploymentState,
    network::NetworkError,
    primitives::Address,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Failed to deploy {contract}")]
    Deployment {
        contract: String,
        #[source]
        source: NetworkError,
    },
    /// The instance at `address` stays deployed but uninitialized.
    #[error("Failed to initialize deployed instance at {address}")]
    Initialization {
        address: Address,
        #[source]
        source: NetworkError,
    },
    #[error("Deployment routine already ran, state is {0:?}")]
    AlreadyStarted(DeploymentState),
}

impl DeployError {
    /// The underlying network error, if the failure came from the network.
    pub fn network_error(&self) -> Option<&NetworkError> {
        match self {
            DeployError::Deployment { source, .. } | DeployError::Initialization { source, .. } => {
                Some(source)
            }
            DeployError::AlreadyStarted(_) => None,
        }
    }
}
