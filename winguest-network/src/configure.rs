use tracing::{Instrument, debug, info, info_span, warn};
use winguest_core::{
    InterfaceDescriptor, InterfaceMap, Machine, MachineLogger, NetworkRequest,
    NetworkType, Result, WinGuestError,
};

use crate::dhcp::is_dhcp_enabled;
use crate::interface_map::build_interface_map;
use crate::scripts::{SetDhcpTemplate, SetStaticAddressTemplate, render};
use crate::work_network::set_networks_to_work;

/// Applies network requests to a guest, one remote command at a time.
#[derive(Default)]
pub struct NetworkConfigurator {
    journal: Option<MachineLogger>,
}

impl NetworkConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records applied and skipped requests in the machine's journal as well.
    pub fn with_journal(journal: MachineLogger) -> Self {
        Self {
            journal: Some(journal),
        }
    }

    /// Resolves guest adapters and applies `requests` in order.
    ///
    /// Under providers without MAC correlation no map is built and every
    /// request is skipped; use [`Self::configure_networks_with_map`] there.
    pub async fn configure_networks(
        &self,
        machine: &Machine,
        requests: &[NetworkRequest],
    ) -> Result<()> {
        debug!("networks: {:?}", requests);

        let interface_map = if machine.supports_driver_mac_correlation() {
            build_interface_map(machine).await?
        } else {
            debug!(
                "Provider {} cannot correlate MAC addresses, skipping interface map",
                machine.provider
            );
            InterfaceMap::new()
        };

        self.configure_networks_with_map(machine, requests, &interface_map)
            .await
    }

    /// Applies `requests` against an already resolved interface map.
    pub async fn configure_networks_with_map(
        &self,
        machine: &Machine,
        requests: &[NetworkRequest],
        interface_map: &InterfaceMap,
    ) -> Result<()> {
        let span = info_span!("configure_networks", machine = %machine.name);

        async {
            for request in requests {
                let Some(interface) = interface_map.get(request.provider_slot()) else {
                    warn!("Could not find interface for network {:?}", request);
                    if let Some(journal) = &self.journal {
                        journal_failure(journal.record_skipped(request).await);
                    }
                    continue;
                };

                self.configure_interface(machine, request, interface).await?;
            }

            if machine.config.windows.set_work_network {
                set_networks_to_work(machine).await?;
                if let Some(journal) = &self.journal {
                    journal_failure(journal.record_work_network().await);
                }
            }

            Ok::<(), WinGuestError>(())
        }
        .instrument(span)
        .await
    }

    async fn configure_interface(
        &self,
        machine: &Machine,
        request: &NetworkRequest,
        interface: &InterfaceDescriptor,
    ) -> Result<()> {
        info!("Configuring interface {:?}", interface);

        match &request.network_type {
            NetworkType::Static => {
                let (Some(ip), Some(netmask)) = (&request.ip, &request.netmask) else {
                    return Err(WinGuestError::ConfigError(format!(
                        "static network on interface {} needs ip and netmask",
                        request.interface
                    )));
                };

                let command = render(
                    "set_static_address",
                    &SetStaticAddressTemplate {
                        name: &interface.name,
                        ip: ip.as_str(),
                        netmask: netmask.as_str(),
                    },
                )?;
                machine.communicate.execute(&command).await?;
            }
            NetworkType::Dhcp => {
                // Re-enabling DHCP on an adapter that already has it errors on the guest
                if is_dhcp_enabled(machine, &interface.index).await? {
                    debug!("{} already uses DHCP", interface.name);
                    return Ok(());
                }

                let command = render(
                    "set_dhcp",
                    &SetDhcpTemplate {
                        name: &interface.name,
                    },
                )?;
                machine.communicate.execute(&command).await?;
            }
            NetworkType::Unsupported(network_type) => {
                return Err(WinGuestError::UnsupportedNetworkType {
                    network_type: network_type.clone(),
                });
            }
        }

        if let Some(journal) = &self.journal {
            journal_failure(journal.record_applied(request, interface).await);
        }

        Ok(())
    }
}

// The journal is best effort; a write failure never aborts configuration.
fn journal_failure(result: Result<()>) {
    if let Err(e) = result {
        warn!("Failed to write machine journal: {}", e);
    }
}

/// Configures `requests` on `machine` without a journal.
pub async fn configure_networks(machine: &Machine, requests: &[NetworkRequest]) -> Result<()> {
    NetworkConfigurator::new()
        .configure_networks(machine, requests)
        .await
}
