//! `network`
//!
//! The capability the deployment routine needs from a chain: create a contract and
//! call into it, both returning only once the transaction is confirmed.

mod mock_network;
pub use mock_network::{
    MockNetwork,
    NetworkRequest,
};

mod rpc_network;
pub use rpc_network::RpcNetwork;

use crate::{
    artifact::ContractArtifact,
    primitives::{
        Address,
        Bytes,
        DeployedInstance,
        TxHash,
    },
};

use alloy_provider::PendingTransactionError;
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;
use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Transport error")]
    TransportError(#[from] TransportError),
    #[error("Failed waiting for confirmation")]
    PendingTransactionError(#[from] PendingTransactionError),
    #[error("Invalid RPC url")]
    InvalidRpcUrl(#[from] url::ParseError),
    #[error("Invalid private key")]
    InvalidPrivateKey(#[from] LocalSignerError),
    #[error("Expected chain id {expected}, endpoint reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
    #[error("No contract address in receipt of {0}")]
    MissingContractAddress(TxHash),
    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

/// Submits transactions to a network and waits for their confirmation.
pub trait Network {
    /// Sends the creation transaction for `artifact`, resolving once it is confirmed.
    fn deploy(
        &self,
        artifact: &ContractArtifact,
    ) -> impl Future<Output = Result<DeployedInstance, NetworkError>> + Send;

    /// Sends a transaction calling `to` with `calldata`, resolving once it is confirmed.
    fn call(
        &self,
        to: Address,
        calldata: Bytes,
    ) -> impl Future<Output = Result<TxHash, NetworkError>> + Send;
}
