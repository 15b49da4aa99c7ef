use crate::output::{OutputFormat, print_info, print_progress, print_success, print_warning};
use winguest_core::{Config, MachineLogger, Result};
use winguest_network::NetworkConfigurator;

pub async fn execute(
    no_work_network: bool,
    no_journal: bool,
    config: Config,
    _format: OutputFormat,
) -> Result<()> {
    let mut machine = winguest_platform::get_machine(&config)?;
    if no_work_network {
        machine.config.windows.set_work_network = false;
    }

    if config.networks.is_empty() {
        print_info("No networks configured, nothing to do");
        return Ok(());
    }

    let configurator = if no_journal {
        NetworkConfigurator::new()
    } else {
        NetworkConfigurator::with_journal(MachineLogger::new(machine.name.clone()))
    };

    print_progress(&format!(
        "Configuring {} network(s) on '{}'",
        config.networks.len(),
        machine.name
    ));

    match &config.interfaces {
        Some(interface_map) => {
            print_info("Using interfaces declared in configuration");
            configurator
                .configure_networks_with_map(&machine, &config.networks, interface_map)
                .await?;
        }
        None => {
            if !machine.supports_driver_mac_correlation() {
                print_warning(&format!(
                    "Provider {} cannot match guest adapters by MAC; declare `interfaces:` in the configuration",
                    machine.provider
                ));
            }
            configurator
                .configure_networks(&machine, &config.networks)
                .await?;
        }
    }

    print_success(&format!("Networks configured on '{}'", machine.name));
    Ok(())
}
