mod ssh;
mod static_driver;
mod virtualbox;
mod wql;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use winguest_core::{Config, Machine, MachineConfig, ProviderDriver, ProviderKind, Result};

pub use ssh::SshCommunicator;
pub use static_driver::StaticDriver;
pub use virtualbox::{VirtualBoxDriver, parse_mac_addresses};
pub use wql::{parse_wql_output, result_set_name};

/// Driver for the configured provider.
///
/// Providers without a native driver read `nic_macs` from configuration.
pub fn get_provider_driver(config: &Config) -> Result<Arc<dyn ProviderDriver>> {
    match ProviderKind::from(config.machine.provider.clone()) {
        ProviderKind::VirtualBox => Ok(Arc::new(VirtualBoxDriver::new(
            config.vm_id().to_string(),
        )?)),
        _ => Ok(Arc::new(StaticDriver::new(&config.machine.nic_macs))),
    }
}

/// Builds the machine handle described by `config`.
pub fn get_machine(config: &Config) -> Result<Machine> {
    let provider = ProviderKind::from(config.machine.provider.clone());
    let driver = get_provider_driver(config)?;
    let communicator = Arc::new(SshCommunicator::new(
        config.machine.name.clone(),
        &config.communicator,
    )?);

    Ok(Machine::new(
        config.machine.name.clone(),
        provider,
        driver,
        communicator,
        MachineConfig {
            windows: config.windows.clone(),
        },
    ))
}
