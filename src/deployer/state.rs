use crate::primitives::DeployedInstance;

/// Progress of a deployment run. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentState {
    #[default]
    NotDeployed,
    Deployed(DeployedInstance),
    Initialized(DeployedInstance),
    /// A step failed; nothing further happens in this run. Holds the instance when
    /// deployment went through before initialization failed.
    Failed(Option<DeployedInstance>),
}

impl DeploymentState {
    /// The deployed instance, once there is one.
    pub fn instance(&self) -> Option<&DeployedInstance> {
        match self {
            DeploymentState::Deployed(instance) | DeploymentState::Initialized(instance) => {
                Some(instance)
            }
            DeploymentState::Failed(instance) => instance.as_ref(),
            DeploymentState::NotDeployed => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, DeploymentState::Initialized(_))
    }
}
