use std::collections::BTreeMap;
use winguest_core::{Config, NetworkRequest, Result};
use winguest_platform::{get_machine, get_provider_driver};

// Helper to create a test configuration for a guest without a native driver
fn create_test_config(provider: &str) -> Config {
    let mut config = Config::default();
    config.machine.name = "integration-win".to_string();
    config.machine.provider = provider.to_string();
    config.machine.nic_macs = BTreeMap::from([
        (1, "08:00:27:00:00:01".to_string()),
        (2, "08:00:27:00:00:02".to_string()),
    ]);
    config.networks = vec![
        NetworkRequest::static_address(1, "192.168.33.10", "255.255.255.0"),
        NetworkRequest::dhcp(0),
    ];
    config
}

#[tokio::test]
async fn test_static_provider_driver() -> Result<()> {
    let config = create_test_config("static");
    let driver = get_provider_driver(&config)?;

    let bindings = driver.read_mac_addresses().await?;

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[1].slot, 2);
    assert_eq!(bindings[1].mac_address.as_str(), "080027000002");

    Ok(())
}

#[tokio::test]
async fn test_vmware_machine_has_no_mac_correlation() -> Result<()> {
    let config = create_test_config("vmware_workstation");

    match get_machine(&config) {
        Ok(machine) => {
            assert!(!machine.supports_driver_mac_correlation());
            assert_eq!(machine.provider.to_string(), "vmware_workstation");
        }
        Err(e) => {
            // ssh client missing in this environment
            println!("Skipping machine checks: {e}");
        }
    }

    Ok(())
}

// Test that requires a reachable Windows guest - marked as ignore
#[tokio::test]
#[ignore = "Requires a Windows guest reachable over SSH"]
async fn test_configure_live_guest() -> Result<()> {
    let config = Config::load()?;
    let machine = get_machine(&config)?;

    let adapters = winguest_network::enumerate_adapters(&machine).await?;
    println!("Guest adapters: {adapters:?}");

    winguest_network::configure_networks(&machine, &config.networks).await?;

    Ok(())
}
