use std::collections::HashMap;
use tracing::{debug, warn};
use winguest_core::{
    GuestAdapter, InterfaceMap, MacAddress, Machine, Result, VirtualNicBinding, WinGuestError,
};

use crate::enumerator::enumerate_adapters;

/// Resolves provider NIC slots to guest adapters by MAC address.
///
/// Fails with `UnsupportedProvider` for back-ends whose driver MACs cannot be
/// correlated with the guest; callers supply a map through another path there.
pub async fn build_interface_map(machine: &Machine) -> Result<InterfaceMap> {
    if !machine.supports_driver_mac_correlation() {
        return Err(WinGuestError::UnsupportedProvider {
            provider: machine.provider.to_string(),
        });
    }

    let bindings = machine.driver.read_mac_addresses().await?;
    debug!("mac addresses: {:?}", bindings);

    let adapters = enumerate_adapters(machine).await?;
    let interface_map = correlate(&bindings, adapters);
    debug!("interface map: {:?}", interface_map);

    Ok(interface_map)
}

/// Joins driver bindings and guest adapters on normalized MAC.
pub fn correlate(bindings: &[VirtualNicBinding], adapters: Vec<GuestAdapter>) -> InterfaceMap {
    let slot_by_mac: HashMap<&MacAddress, u32> = bindings
        .iter()
        .map(|binding| (&binding.mac_address, binding.slot))
        .collect();

    let mut interface_map = InterfaceMap::new();
    for adapter in adapters {
        debug!("nic: {:?}", adapter);

        let Some(&slot) = slot_by_mac.get(&adapter.mac_address) else {
            continue;
        };

        if let Some(existing) = interface_map.get(slot) {
            warn!(
                "Adapter {:?} shares MAC {} with {:?}, keeping the first",
                adapter.name, adapter.mac_address, existing.name
            );
            continue;
        }

        interface_map.insert(slot, adapter.into());
    }

    interface_map
}
