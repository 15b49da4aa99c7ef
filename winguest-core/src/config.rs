use crate::types::{InterfaceMap, NetworkRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub machine: MachineSection,
    pub communicator: CommunicatorConfig,
    #[serde(default)]
    pub windows: WindowsConfig,
    #[serde(default)]
    pub networks: Vec<NetworkRequest>,
    /// Pre-resolved slot map for providers without MAC correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<InterfaceMap>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSection {
    pub name: String,
    pub provider: String,
    /// VM name or UUID as known to the provider; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_id: Option<String>,
    /// Slot to MAC pairs for the `static` provider.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nic_macs: BTreeMap<u32, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicatorConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowsConfig {
    /// Move every guest connection to the "Work" network location after
    /// configuring networks.
    #[serde(default)]
    pub set_work_network: bool,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            crate::WinGuestError::ConfigError(format!("{}: {e}", path.display()))
        })
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(config_dir) = path.parent() {
            std::fs::create_dir_all(config_dir)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| crate::WinGuestError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn config_path() -> crate::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            crate::WinGuestError::ConfigError("Cannot determine home directory".to_string())
        })?;
        Ok(home.join(".winguest").join("config.yaml"))
    }

    pub fn vm_id(&self) -> &str {
        self.machine.vm_id.as_deref().unwrap_or(&self.machine.name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            machine: MachineSection {
                name: "default".to_string(),
                provider: "virtualbox".to_string(),
                vm_id: None,
                nic_macs: BTreeMap::new(),
            },
            communicator: CommunicatorConfig {
                host: "127.0.0.1".to_string(),
                port: 2222,
                user: "vagrant".to_string(),
                key_path: None,
            },
            windows: WindowsConfig::default(),
            networks: vec![],
            interfaces: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NetworkType;

    const SAMPLE: &str = r#"
version: "1.0"
machine:
  name: win7
  provider: virtualbox
  vm_id: 4f1c2a3e-win7
communicator:
  host: 127.0.0.1
  port: 2200
  user: vagrant
windows:
  set_work_network: true
networks:
  - interface: 1
    type: static
    ip: 192.168.33.10
    netmask: 255.255.255.0
  - interface: 2
    type: dhcp
  - interface: 3
    type: bridged
"#;

    #[test]
    fn test_parse_sample_config() {
        let config: Config = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(config.machine.name, "win7");
        assert_eq!(config.vm_id(), "4f1c2a3e-win7");
        assert!(config.windows.set_work_network);
        assert_eq!(config.networks.len(), 3);
        assert_eq!(
            config.networks[0],
            NetworkRequest::static_address(1, "192.168.33.10", "255.255.255.0")
        );
        assert_eq!(config.networks[1].network_type, NetworkType::Dhcp);
        assert_eq!(
            config.networks[2].network_type,
            NetworkType::Unsupported("bridged".to_string())
        );
        assert!(config.interfaces.is_none());
    }

    #[test]
    fn test_interfaces_section_and_static_macs() {
        let yaml = r#"
version: "1.0"
machine:
  name: fusion-box
  provider: vmware_fusion
  nic_macs:
    1: "00:0c:29:aa:bb:cc"
communicator:
  host: 10.0.0.5
  port: 22
  user: admin
interfaces:
  2:
    name: Ethernet 2
    mac_address: 000c29aabbcd
    interface_index: "12"
    index: "8"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(!config.windows.set_work_network);
        assert_eq!(config.vm_id(), "fusion-box");
        assert_eq!(config.machine.nic_macs.get(&1).unwrap(), "00:0c:29:aa:bb:cc");

        let interfaces = config.interfaces.unwrap();
        let descriptor = interfaces.get(2).unwrap();
        assert_eq!(descriptor.name, "Ethernet 2");
        assert_eq!(descriptor.mac_address.as_str(), "000C29AABBCD");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.networks.push(NetworkRequest::dhcp(0));
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.networks, vec![NetworkRequest::dhcp(0)]);
        assert_eq!(reloaded.communicator.user, "vagrant");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "machine: [").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(crate::WinGuestError::ConfigError(_))));
    }
}
