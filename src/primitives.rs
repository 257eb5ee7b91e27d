pub use alloy_primitives::{
    address,
    bytes,
    hex,
    keccak256,
    Address,
    Bytes,
    TxHash,
    B256,
};

/// Handle to a contract instance whose creation transaction has been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeployedInstance {
    /// Address the contract was created at.
    pub address: Address,
    /// Hash of the creation transaction.
    pub tx_hash: TxHash,
}

/// Result of a run that went through both deployment and initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub instance: DeployedInstance,
    /// Hash of the confirmed `createDonationContract()` transaction.
    pub init_tx_hash: TxHash,
}
