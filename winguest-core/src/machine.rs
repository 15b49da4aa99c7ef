use crate::config::WindowsConfig;
use crate::error::*;
use crate::types::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Channel that runs commands on the guest.
///
/// Implementations drain the whole output stream before returning, so callers
/// see one blocking request/response per command.
#[async_trait]
pub trait Communicator: Send + Sync {
    async fn execute(&self, command: &str) -> Result<CommandOutput>;
    async fn wql(&self, query: &str) -> Result<WqlResult>;
}

/// Virtualization back-end view of a machine.
#[async_trait]
pub trait ProviderDriver: Send + Sync {
    async fn read_mac_addresses(&self) -> Result<Vec<VirtualNicBinding>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderKind {
    VirtualBox,
    VmwareFusion,
    VmwareWorkstation,
    HyperV,
    Static,
    Other(String),
}

impl ProviderKind {
    pub fn capabilities(&self) -> ProviderCapabilities {
        match self {
            ProviderKind::VmwareFusion | ProviderKind::VmwareWorkstation => ProviderCapabilities {
                supports_driver_mac_correlation: false,
            },
            _ => ProviderCapabilities {
                supports_driver_mac_correlation: true,
            },
        }
    }
}

impl From<String> for ProviderKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "virtualbox" => ProviderKind::VirtualBox,
            "vmware_fusion" => ProviderKind::VmwareFusion,
            "vmware_workstation" => ProviderKind::VmwareWorkstation,
            "hyperv" => ProviderKind::HyperV,
            "static" => ProviderKind::Static,
            _ => ProviderKind::Other(raw),
        }
    }
}

impl From<ProviderKind> for String {
    fn from(kind: ProviderKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::VirtualBox => write!(f, "virtualbox"),
            ProviderKind::VmwareFusion => write!(f, "vmware_fusion"),
            ProviderKind::VmwareWorkstation => write!(f, "vmware_workstation"),
            ProviderKind::HyperV => write!(f, "hyperv"),
            ProviderKind::Static => write!(f, "static"),
            ProviderKind::Other(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub supports_driver_mac_correlation: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub windows: WindowsConfig,
}

/// Handle to a guest and the collaborators that reach it.
#[derive(Clone)]
pub struct Machine {
    pub name: String,
    pub provider: ProviderKind,
    pub capabilities: ProviderCapabilities,
    pub driver: Arc<dyn ProviderDriver>,
    pub communicate: Arc<dyn Communicator>,
    pub config: MachineConfig,
}

impl Machine {
    pub fn new(
        name: String,
        provider: ProviderKind,
        driver: Arc<dyn ProviderDriver>,
        communicate: Arc<dyn Communicator>,
        config: MachineConfig,
    ) -> Self {
        let capabilities = provider.capabilities();
        Self {
            name,
            provider,
            capabilities,
            driver,
            communicate,
            config,
        }
    }

    pub fn supports_driver_mac_correlation(&self) -> bool {
        self.capabilities.supports_driver_mac_correlation
    }
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("capabilities", &self.capabilities)
            .field("config", &self.config)
            .finish()
    }
}
