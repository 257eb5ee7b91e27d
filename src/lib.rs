mod error;
pub use error::DeployError;

mod deployer;
pub use deployer::{
    DeploymentState,
    FlashLoanDeployer,
};

pub mod primitives;

pub mod artifact;

pub mod bindings;

pub mod config;

pub mod network;

#[cfg(any(test, feature = "test"))]
pub mod test_utils;
