use crate::Result;
use crate::types::{InterfaceDescriptor, NetworkRequest, NetworkType};
use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// One line of a machine's network journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    /// A request was sent to the guest adapter resolved for it.
    Applied {
        interface: u32,
        adapter: String,
        setting: String,
    },
    /// No guest adapter was resolved for the request's slot.
    Skipped { interface: u32, network_type: String },
    /// Every network profile was moved to the Work category.
    WorkNetwork,
}

impl JournalEntry {
    pub fn applied(request: &NetworkRequest, interface: &InterfaceDescriptor) -> Self {
        let setting = match (&request.network_type, &request.ip, &request.netmask) {
            (NetworkType::Static, Some(ip), Some(netmask)) => format!("static {ip} {netmask}"),
            (network_type, _, _) => network_type.to_string(),
        };

        JournalEntry::Applied {
            interface: request.interface,
            adapter: interface.name.clone(),
            setting,
        }
    }

    pub fn skipped(request: &NetworkRequest) -> Self {
        JournalEntry::Skipped {
            interface: request.interface,
            network_type: request.network_type.to_string(),
        }
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalEntry::Applied {
                interface,
                adapter,
                setting,
            } => write!(f, "applied interface={interface} adapter={adapter:?} {setting}"),
            JournalEntry::Skipped {
                interface,
                network_type,
            } => write!(
                f,
                "skipped interface={interface} type={network_type}: no guest adapter"
            ),
            JournalEntry::WorkNetwork => write!(f, "network category set to work"),
        }
    }
}

/// Append-only record of the network changes made to one guest,
/// kept at `~/.winguest/logs/<machine>.log` unless placed elsewhere.
pub struct MachineLogger {
    machine_name: String,
    log_file: PathBuf,
}

impl MachineLogger {
    pub fn new(machine_name: String) -> Self {
        let log_file = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".winguest")
            .join("logs")
            .join(format!("{machine_name}.log"));

        Self::with_path(machine_name, log_file)
    }

    pub fn with_path(machine_name: String, log_file: PathBuf) -> Self {
        Self {
            machine_name,
            log_file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_file
    }

    pub async fn record_applied(
        &self,
        request: &NetworkRequest,
        interface: &InterfaceDescriptor,
    ) -> Result<()> {
        self.append(&JournalEntry::applied(request, interface)).await
    }

    pub async fn record_skipped(&self, request: &NetworkRequest) -> Result<()> {
        self.append(&JournalEntry::skipped(request)).await
    }

    pub async fn record_work_network(&self) -> Result<()> {
        self.append(&JournalEntry::WorkNetwork).await
    }

    async fn append(&self, entry: &JournalEntry) -> Result<()> {
        if let Some(parent) = self.log_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let line = format!(
            "{} [{}] {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            self.machine_name,
            entry
        );

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MacAddress;

    fn ethernet_2() -> InterfaceDescriptor {
        InterfaceDescriptor {
            name: "Ethernet 2".to_string(),
            mac_address: MacAddress::new("08:00:27:00:00:02"),
            interface_index: "12".to_string(),
            index: "8".to_string(),
        }
    }

    #[test]
    fn test_entry_text() {
        let applied = JournalEntry::applied(
            &NetworkRequest::static_address(1, "192.168.56.10", "255.255.255.0"),
            &ethernet_2(),
        );
        assert_eq!(
            applied.to_string(),
            r#"applied interface=1 adapter="Ethernet 2" static 192.168.56.10 255.255.255.0"#
        );

        let dhcp = JournalEntry::applied(&NetworkRequest::dhcp(1), &ethernet_2());
        assert_eq!(dhcp.to_string(), r#"applied interface=1 adapter="Ethernet 2" dhcp"#);

        assert_eq!(
            JournalEntry::skipped(&NetworkRequest::dhcp(4)).to_string(),
            "skipped interface=4 type=dhcp: no guest adapter"
        );
    }

    #[tokio::test]
    async fn test_journal_creates_directory_and_appends() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let journal = MachineLogger::with_path(
            "win7".to_string(),
            dir.path().join("logs").join("win7.log"),
        );

        journal
            .record_applied(&NetworkRequest::dhcp(1), &ethernet_2())
            .await?;
        journal.record_skipped(&NetworkRequest::dhcp(3)).await?;
        journal.record_work_network().await?;

        let content = std::fs::read_to_string(journal.path())?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(r#"[win7] applied interface=1 adapter="Ethernet 2" dhcp"#));
        assert!(lines[1].ends_with("[win7] skipped interface=3 type=dhcp: no guest adapter"));
        assert!(lines[2].ends_with("[win7] network category set to work"));

        Ok(())
    }
}
