use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;
use winguest_core::{ProviderDriver, Result, VirtualNicBinding, WinGuestError};

/// Reads NIC MAC addresses from `VBoxManage showvminfo --machinereadable`.
pub struct VirtualBoxDriver {
    vm_id: String,
    vboxmanage: PathBuf,
}

impl VirtualBoxDriver {
    pub fn new(vm_id: String) -> Result<Self> {
        let vboxmanage = which::which("VBoxManage")
            .or_else(|_| which::which("vboxmanage"))
            .map_err(|e| WinGuestError::ProviderError {
                provider: "virtualbox".to_string(),
                message: format!("VBoxManage not found: {e}"),
            })?;

        Ok(Self { vm_id, vboxmanage })
    }
}

#[async_trait]
impl ProviderDriver for VirtualBoxDriver {
    async fn read_mac_addresses(&self) -> Result<Vec<VirtualNicBinding>> {
        debug!("Reading MAC addresses of VirtualBox VM {}", self.vm_id);

        let output = Command::new(&self.vboxmanage)
            .args(["showvminfo", &self.vm_id, "--machinereadable"])
            .output()
            .await
            .map_err(|e| WinGuestError::ProviderError {
                provider: "virtualbox".to_string(),
                message: format!("Failed to execute VBoxManage: {e}"),
            })?;

        if !output.status.success() {
            return Err(WinGuestError::ProviderError {
                provider: "virtualbox".to_string(),
                message: format!(
                    "VBoxManage showvminfo failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                ),
            });
        }

        Ok(parse_mac_addresses(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Picks `macaddressN="..."` lines out of machine-readable VM info.
pub fn parse_mac_addresses(info: &str) -> Vec<VirtualNicBinding> {
    info.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let slot = key.strip_prefix("macaddress")?.parse::<u32>().ok()?;
            let mac = value.trim().trim_matches('"');
            (!mac.is_empty()).then(|| VirtualNicBinding::new(slot, mac))
        })
        .collect()
}
