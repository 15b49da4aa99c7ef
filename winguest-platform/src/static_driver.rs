use async_trait::async_trait;
use std::collections::BTreeMap;
use winguest_core::{ProviderDriver, Result, VirtualNicBinding};

/// Driver answering with slot to MAC pairs declared in configuration.
pub struct StaticDriver {
    bindings: Vec<VirtualNicBinding>,
}

impl StaticDriver {
    pub fn new(nic_macs: &BTreeMap<u32, String>) -> Self {
        Self {
            bindings: nic_macs
                .iter()
                .map(|(slot, mac)| VirtualNicBinding::new(*slot, mac.as_str()))
                .collect(),
        }
    }
}

#[async_trait]
impl ProviderDriver for StaticDriver {
    async fn read_mac_addresses(&self) -> Result<Vec<VirtualNicBinding>> {
        Ok(self.bindings.clone())
    }
}
