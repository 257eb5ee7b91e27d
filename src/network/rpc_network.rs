use crate::{
    artifact::ContractArtifact,
    config::DeployConfig,
    network::{
        Network,
        NetworkError,
    },
    primitives::{
        Address,
        Bytes,
        DeployedInstance,
        TxHash,
    },
};

use alloy_network::{
    EthereumWallet,
    ReceiptResponse,
    TransactionBuilder,
};
use alloy_provider::{
    Provider,
    ProviderBuilder,
};
use alloy_rpc_types::{
    TransactionReceipt,
    TransactionRequest,
};
use alloy_signer_local::PrivateKeySigner;

use std::str::FromStr;
use tracing::{
    debug,
    instrument,
};
use url::Url;

/// A [`Network`] backed by a JSON-RPC endpoint, signing with a local private key.
#[derive(Debug, Clone)]
pub struct RpcNetwork<P> {
    provider: P,
    signer_address: Address,
    confirmations: u64,
}

impl RpcNetwork<()> {
    /// Connects to the endpoint described by `config`.
    pub async fn connect(
        config: &DeployConfig,
    ) -> Result<RpcNetwork<impl Provider + Clone>, NetworkError> {
        let url = Url::parse(&config.rpc_url)?;
        let signer = PrivateKeySigner::from_str(config.private_key.trim())?;

        Self::connect_with_signer(url, signer, config.chain_id, config.confirmations).await
    }

    /// Connects to `url` signing with `signer`.
    /// When `expected_chain_id` is set the endpoint's chain id is checked before returning.
    pub async fn connect_with_signer(
        url: Url,
        signer: PrivateKeySigner,
        expected_chain_id: Option<u64>,
        confirmations: u64,
    ) -> Result<RpcNetwork<impl Provider + Clone>, NetworkError> {
        let signer_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .on_http(url);

        let chain_id = provider.get_chain_id().await?;
        if let Some(expected) = expected_chain_id {
            if expected != chain_id {
                return Err(NetworkError::ChainIdMismatch {
                    expected,
                    actual: chain_id,
                });
            }
        }

        debug!(chain_id, signer = %signer_address, "Connected to network");

        Ok(RpcNetwork {
            provider,
            signer_address,
            confirmations,
        })
    }
}

impl<P: Provider> RpcNetwork<P> {
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Address of the account sending the transactions.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Sends `tx` and waits for the configured confirmations, failing on a reverted receipt.
    async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, NetworkError> {
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(%tx_hash, "Transaction submitted, awaiting confirmation");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;

        if !receipt.status() {
            return Err(NetworkError::Reverted(receipt.transaction_hash()));
        }

        Ok(receipt)
    }
}

impl<P: Provider> Network for RpcNetwork<P> {
    #[instrument(skip_all, fields(contract = %artifact.name))]
    async fn deploy(&self, artifact: &ContractArtifact) -> Result<DeployedInstance, NetworkError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer_address)
            .with_deploy_code(artifact.bytecode.clone());

        let receipt = self.send_and_confirm(tx).await?;
        let tx_hash = receipt.transaction_hash();
        let address = receipt
            .contract_address()
            .ok_or(NetworkError::MissingContractAddress(tx_hash))?;

        Ok(DeployedInstance { address, tx_hash })
    }

    #[instrument(skip(self, calldata))]
    async fn call(&self, to: Address, calldata: Bytes) -> Result<TxHash, NetworkError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer_address)
            .with_to(to)
            .with_input(calldata);

        let receipt = self.send_and_confirm(tx).await?;

        Ok(receipt.transaction_hash())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        bindings::create_donation_contract_calldata,
        primitives::bytes,
        test_utils::ACCEPTING_CODE,
    };

    use alloy_node_bindings::{
        Anvil,
        AnvilInstance,
    };

    /// Creation code returning a runtime that reverts on every call.
    const REVERTING_RUNTIME_CODE: Bytes = bytes!("600580600b6000396000f360006000fd");
    /// Creation code that reverts in the constructor.
    const REVERTING_CONSTRUCTOR_CODE: Bytes = bytes!("60006000fd");

    async fn setup(confirmations: u64) -> (RpcNetwork<impl Provider + Clone>, AnvilInstance) {
        let anvil = Anvil::new().spawn();
        let signer = PrivateKeySigner::from(anvil.keys()[0].clone());

        let network = RpcNetwork::connect_with_signer(
            anvil.endpoint_url(),
            signer,
            Some(anvil.chain_id()),
            confirmations,
        )
        .await
        .unwrap();

        (network, anvil)
    }

    #[tokio::test]
    async fn test_deploy_and_call() {
        let (network, _anvil) = setup(1).await;

        let instance = network
            .deploy(&ContractArtifact::new("Accepting", ACCEPTING_CODE))
            .await
            .unwrap();

        let code = network.provider().get_code_at(instance.address).await.unwrap();
        assert_eq!(code, bytes!("00"));

        let receipt = network
            .provider()
            .get_transaction_receipt(instance.tx_hash)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.contract_address, Some(instance.address));

        let init_tx_hash = network
            .call(instance.address, create_donation_contract_calldata())
            .await
            .unwrap();
        assert_ne!(init_tx_hash, instance.tx_hash);
    }

    #[tokio::test]
    async fn test_each_deploy_creates_a_new_instance() {
        let (network, _anvil) = setup(1).await;
        let artifact = ContractArtifact::new("Accepting", ACCEPTING_CODE);

        let first = network.deploy(&artifact).await.unwrap();
        let second = network.deploy(&artifact).await.unwrap();

        assert_ne!(first.address, second.address);
    }

    #[tokio::test]
    async fn test_reverting_constructor_fails_deploy() {
        let (network, _anvil) = setup(1).await;

        let result = network
            .deploy(&ContractArtifact::new(
                "RevertingConstructor",
                REVERTING_CONSTRUCTOR_CODE,
            ))
            .await;

        // Gas estimation hits the revert before anything is submitted
        assert!(matches!(result, Err(NetworkError::TransportError(_))));
    }

    #[tokio::test]
    async fn test_reverting_call_fails() {
        let (network, _anvil) = setup(1).await;

        let instance = network
            .deploy(&ContractArtifact::new("Reverting", REVERTING_RUNTIME_CODE))
            .await
            .unwrap();

        let result = network
            .call(instance.address, create_donation_contract_calldata())
            .await;

        assert!(matches!(result, Err(NetworkError::TransportError(_))));
    }

    /// Fixed gas and fees so the transaction is mined without estimation.
    fn unestimated(tx: TransactionRequest) -> TransactionRequest {
        tx.with_gas_limit(100_000)
            .with_max_fee_per_gas(10_000_000_000)
            .with_max_priority_fee_per_gas(1_000_000_000)
    }

    #[tokio::test]
    async fn test_reverted_call_receipt_is_rejected() {
        let (network, _anvil) = setup(1).await;

        let instance = network
            .deploy(&ContractArtifact::new("Reverting", REVERTING_RUNTIME_CODE))
            .await
            .unwrap();

        let tx = unestimated(
            TransactionRequest::default()
                .with_from(network.signer_address())
                .with_to(instance.address)
                .with_input(create_donation_contract_calldata()),
        );
        let result = network.send_and_confirm(tx).await;

        match result {
            Err(NetworkError::Reverted(tx_hash)) => {
                let receipt = network
                    .provider()
                    .get_transaction_receipt(tx_hash)
                    .await
                    .unwrap()
                    .unwrap();
                assert!(!receipt.status());
            }
            Err(err) => panic!("Expected Reverted, got {err:?}"),
            Ok(receipt) => panic!("Expected Reverted, got {receipt:?}"),
        }
    }

    #[tokio::test]
    async fn test_reverted_creation_receipt_is_rejected() {
        let (network, _anvil) = setup(1).await;

        let tx = unestimated(
            TransactionRequest::default()
                .with_from(network.signer_address())
                .with_deploy_code(REVERTING_CONSTRUCTOR_CODE),
        );
        let result = network.send_and_confirm(tx).await;

        assert!(matches!(result, Err(NetworkError::Reverted(_))));
    }

    #[tokio::test]
    async fn test_chain_id_mismatch() {
        let anvil = Anvil::new().spawn();
        let signer = PrivateKeySigner::from(anvil.keys()[0].clone());

        let result = RpcNetwork::connect_with_signer(
            anvil.endpoint_url(),
            signer,
            Some(anvil.chain_id() + 1),
            1,
        )
        .await;

        match result {
            Err(NetworkError::ChainIdMismatch { expected, actual }) => {
                assert_eq!(expected, anvil.chain_id() + 1);
                assert_eq!(actual, anvil.chain_id());
            }
            Err(err) => panic!("Expected ChainIdMismatch, got {err:?}"),
            Ok(_) => panic!("Expected ChainIdMismatch"),
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_config() {
        let config = DeployConfig {
            rpc_url: "not a url".to_string(),
            private_key: "0x01".to_string(),
            artifacts_dir: "build/contracts".into(),
            contract: "UnilendFlashLoanCore".to_string(),
            chain_id: None,
            confirmations: 1,
        };
        assert!(matches!(
            RpcNetwork::connect(&config).await,
            Err(NetworkError::InvalidRpcUrl(_))
        ));

        let config = DeployConfig {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            private_key: "not a key".to_string(),
            ..config
        };
        assert!(matches!(
            RpcNetwork::connect(&config).await,
            Err(NetworkError::InvalidPrivateKey(_))
        ));
    }
}
