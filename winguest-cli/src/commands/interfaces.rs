use crate::output::{OutputFormat, print_warning};
use serde::Serialize;
use tabled::Tabled;
use winguest_core::{Config, InterfaceMap, Result};

#[derive(Serialize, Tabled)]
struct InterfaceRow {
    slot: u32,
    #[tabled(rename = "request interface")]
    request_interface: u32,
    name: String,
    #[tabled(rename = "mac address")]
    mac_address: String,
    #[tabled(rename = "interface index")]
    interface_index: String,
    index: String,
}

fn rows(interface_map: &InterfaceMap) -> Vec<InterfaceRow> {
    interface_map
        .iter()
        .map(|(slot, descriptor)| InterfaceRow {
            slot: *slot,
            request_interface: slot.saturating_sub(1),
            name: descriptor.name.clone(),
            mac_address: descriptor.mac_address.to_string(),
            interface_index: descriptor.interface_index.clone(),
            index: descriptor.index.clone(),
        })
        .collect()
}

pub async fn execute(config: Config, format: OutputFormat) -> Result<()> {
    let interface_map = match &config.interfaces {
        Some(interface_map) => interface_map.clone(),
        None => {
            let machine = winguest_platform::get_machine(&config)?;
            if !machine.supports_driver_mac_correlation() {
                print_warning(&format!(
                    "Provider {} cannot match guest adapters by MAC",
                    machine.provider
                ));
            }
            winguest_network::build_interface_map(&machine).await?
        }
    };

    println!(
        "{}",
        format.render_rows(&rows(&interface_map), "No guest adapter matches a provider NIC")
    );
    Ok(())
}
