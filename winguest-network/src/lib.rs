mod configure;
mod dhcp;
mod enumerator;
mod interface_map;
mod scripts;
mod work_network;


pub use configure::{NetworkConfigurator, configure_networks};
pub use dhcp::is_dhcp_enabled;
pub use enumerator::{
    EnumerationStrategy, detect_remote_management_version, enumerate_adapters,
    enumerate_adapters_for_version, parse_adapter_json, parse_wql_rows,
};
pub use interface_map::{build_interface_map, correlate};
pub use scripts::NETWORK_ADAPTERS_WQL;
pub use work_network::set_networks_to_work;
