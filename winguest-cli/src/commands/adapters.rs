use crate::output::{OutputFormat, print_info};
use serde::Serialize;
use tabled::Tabled;
use winguest_core::{Config, GuestAdapter, Result};
use winguest_network::{
    EnumerationStrategy, detect_remote_management_version, enumerate_adapters_for_version,
};

#[derive(Serialize, Tabled)]
struct AdapterRow {
    name: String,
    #[tabled(rename = "mac address")]
    mac_address: String,
    #[tabled(rename = "interface index")]
    interface_index: String,
    index: String,
}

impl From<GuestAdapter> for AdapterRow {
    fn from(adapter: GuestAdapter) -> Self {
        AdapterRow {
            name: adapter.name,
            mac_address: adapter.mac_address.to_string(),
            interface_index: adapter.interface_index,
            index: adapter.index,
        }
    }
}

pub async fn execute(config: Config, format: OutputFormat) -> Result<()> {
    let machine = winguest_platform::get_machine(&config)?;

    let version = detect_remote_management_version(&machine).await?;
    if matches!(format, OutputFormat::Table) {
        print_info(&format!(
            "WS-Management {} ({:?} enumeration)",
            version,
            EnumerationStrategy::for_version(version)
        ));
    }

    let adapters = enumerate_adapters_for_version(&machine, version).await?;
    let rows: Vec<AdapterRow> = adapters.into_iter().map(AdapterRow::from).collect();

    println!("{}", format.render_rows(&rows, "No adapters reported by the guest"));
    Ok(())
}
