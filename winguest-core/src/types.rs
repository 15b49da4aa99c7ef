use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// MAC address in canonical form: no separators, upper case hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    pub fn new(raw: &str) -> Self {
        let naked: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ':' && *c != '-')
            .collect();
        Self(naked.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MacAddress {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for MacAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a requested network obtains its address.
///
/// Unknown values are kept rather than rejected at parse time so the
/// configurator can fail with the offending type once it reaches that request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NetworkType {
    Static,
    Dhcp,
    Unsupported(String),
}

impl From<String> for NetworkType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "static" => NetworkType::Static,
            "dhcp" => NetworkType::Dhcp,
            _ => NetworkType::Unsupported(raw),
        }
    }
}

impl From<NetworkType> for String {
    fn from(network_type: NetworkType) -> Self {
        network_type.to_string()
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkType::Static => write!(f, "static"),
            NetworkType::Dhcp => write!(f, "dhcp"),
            NetworkType::Unsupported(raw) => write!(f, "{raw}"),
        }
    }
}

/// A desired interface configuration. `interface` is the 0-based slot used by
/// orchestration config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub interface: u32,
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
}

impl NetworkRequest {
    pub fn static_address(interface: u32, ip: &str, netmask: &str) -> Self {
        Self {
            interface,
            network_type: NetworkType::Static,
            ip: Some(ip.to_string()),
            netmask: Some(netmask.to_string()),
        }
    }

    pub fn dhcp(interface: u32) -> Self {
        Self {
            interface,
            network_type: NetworkType::Dhcp,
            ip: None,
            netmask: None,
        }
    }

    /// Slot on the virtualization side, which counts from 1.
    pub fn provider_slot(&self) -> u32 {
        self.interface.saturating_add(1)
    }
}

/// Virtualization layer record associating a 1-based NIC slot with its MAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualNicBinding {
    pub slot: u32,
    pub mac_address: MacAddress,
}

impl VirtualNicBinding {
    pub fn new(slot: u32, mac_address: impl Into<MacAddress>) -> Self {
        Self {
            slot,
            mac_address: mac_address.into(),
        }
    }
}

/// Network adapter as reported by the guest OS.
///
/// `index` addresses `Win32_NetworkAdapterConfiguration` (used by the DHCP
/// check); `interface_index` is the IP helper index and only informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestAdapter {
    pub name: String,
    pub mac_address: MacAddress,
    pub interface_index: String,
    pub index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub mac_address: MacAddress,
    pub interface_index: String,
    pub index: String,
}

impl From<GuestAdapter> for InterfaceDescriptor {
    fn from(adapter: GuestAdapter) -> Self {
        Self {
            name: adapter.name,
            mac_address: adapter.mac_address,
            interface_index: adapter.interface_index,
            index: adapter.index,
        }
    }
}

/// Provider slot (1-based) to guest adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceMap {
    slots: BTreeMap<u32, InterfaceDescriptor>,
}

impl InterfaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: u32, descriptor: InterfaceDescriptor) {
        self.slots.insert(slot, descriptor);
    }

    pub fn get(&self, slot: u32) -> Option<&InterfaceDescriptor> {
        self.slots.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &InterfaceDescriptor)> {
        self.slots.iter()
    }
}

impl FromIterator<(u32, InterfaceDescriptor)> for InterfaceMap {
    fn from_iter<I: IntoIterator<Item = (u32, InterfaceDescriptor)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }
}

/// Fully drained output of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub lines: Vec<OutputLine>,
}

impl CommandOutput {
    pub fn new(lines: Vec<OutputLine>) -> Self {
        Self { lines }
    }

    /// Stdout lines joined without separators, the way the remote channel
    /// may split a single logical line.
    pub fn stdout(&self) -> String {
        self.lines
            .iter()
            .filter(|line| line.stream == OutputStream::Stdout)
            .map(|line| line.text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub type WqlRow = serde_json::Map<String, serde_json::Value>;

/// WQL rows keyed by snake-cased result set name, e.g. `win32_network_adapter`.
pub type WqlResult = HashMap<String, Vec<WqlRow>>;
