use crate::{
    artifact::ContractArtifact,
    network::{
        Network,
        NetworkError,
    },
    primitives::{
        keccak256,
        Address,
        Bytes,
        DeployedInstance,
        TxHash,
    },
};

use parking_lot::Mutex;
use std::{
    collections::VecDeque,
    sync::Arc,
};
use tracing::trace;

/// A request received by the [`MockNetwork`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkRequest {
    Deploy { contract: String, bytecode: Bytes },
    Call { to: Address, calldata: Bytes },
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<NetworkRequest>,
    addresses: VecDeque<Address>,
    deployments: u64,
    transactions: u64,
    deploy_failure: Option<String>,
    call_failure: Option<String>,
}

/// An in-memory network that records every request it receives.
/// Deployments get the queued addresses first, then sequential addresses. Failures can be
/// scripted per request kind.
/// Clones share state, so a single mock can back several deployment runs.
/// ``` rust
/// use flashloan_deployer::{
///     artifact::ContractArtifact,
///     network::MockNetwork,
///     primitives::{
///         address,
///         Bytes,
///     },
///     FlashLoanDeployer,
/// };
///
/// #[tokio::main]
/// async fn main() {
///     let network = MockNetwork::new();
///     network.queue_address(address!("abc0000000000000000000000000000000000001"));
///
///     let artifact = ContractArtifact::new("UnilendFlashLoanCore", Bytes::from_static(&[0x00]));
///     let outcome = FlashLoanDeployer::new(network.clone())
///         .run(&artifact)
///         .await
///         .unwrap();
///
///     assert_eq!(
///         outcome.instance.address,
///         address!("abc0000000000000000000000000000000000001")
///     );
///     assert_eq!(network.requests().len(), 2);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    state: Arc<Mutex<MockState>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address handed out by the next deployment that has no queued address ahead of it.
    pub fn queue_address(&self, address: Address) {
        self.state.lock().addresses.push_back(address);
    }

    /// Makes every following deployment fail with `reason`.
    pub fn fail_deploy(&self, reason: impl Into<String>) {
        self.state.lock().deploy_failure = Some(reason.into());
    }

    /// Makes every following call fail with `reason`.
    pub fn fail_call(&self, reason: impl Into<String>) {
        self.state.lock().call_failure = Some(reason.into());
    }

    /// All requests received so far, failed ones included, in arrival order.
    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of deployments that were confirmed.
    pub fn deployments(&self) -> u64 {
        self.state.lock().deployments
    }
}

impl MockState {
    fn next_tx_hash(&mut self) -> TxHash {
        self.transactions += 1;
        keccak256(self.transactions.to_be_bytes())
    }
}

impl Network for MockNetwork {
    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeployedInstance, NetworkError> {
        let mut state = self.state.lock();
        state.requests.push(NetworkRequest::Deploy {
            contract: artifact.name.clone(),
            bytecode: artifact.bytecode.clone(),
        });

        if let Some(reason) = &state.deploy_failure {
            return Err(NetworkError::Rejected(reason.clone()));
        }

        state.deployments += 1;
        let address = match state.addresses.pop_front() {
            Some(address) => address,
            None => Address::left_padding_from(&state.deployments.to_be_bytes()),
        };
        let tx_hash = state.next_tx_hash();

        trace!(%address, %tx_hash, "Mock deployment confirmed");
        Ok(DeployedInstance { address, tx_hash })
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<TxHash, NetworkError> {
        let mut state = self.state.lock();
        state.requests.push(NetworkRequest::Call { to, calldata });

        if let Some(reason) = &state.call_failure {
            return Err(NetworkError::Rejected(reason.clone()));
        }

        let tx_hash = state.next_tx_hash();
        trace!(%to, %tx_hash, "Mock call confirmed");
        Ok(tx_hash)
    }
}
