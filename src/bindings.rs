//! `bindings`
//!
//! Solidity interface of the FlashLoanCore contract, limited to the entry points
//! this crate invokes.

use crate::primitives::Bytes;

use alloy_sol_types::{
    sol,
    SolCall,
};

sol! {
    #[derive(Debug)]
    interface IFlashLoanCore {
        function createDonationContract() external;
    }
}

/// Calldata for `createDonationContract()`.
pub fn create_donation_contract_calldata() -> Bytes {
    IFlashLoanCore::createDonationContractCall {}
        .abi_encode()
        .into()
}
