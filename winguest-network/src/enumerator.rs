use serde_json::Value;
use tracing::{debug, warn};
use winguest_core::{GuestAdapter, MacAddress, Machine, Result, WinGuestError, WqlRow};

use crate::scripts::{
    NETWORK_ADAPTERS_WQL, NetworkAdaptersTemplate, WsmanVersionTemplate, render,
};

const NETWORK_ADAPTER_RESULT_SET: &str = "win32_network_adapter";

/// How guest adapters are listed for a given WS-Management major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationStrategy {
    /// WS-Management 2: the session answers WQL directly.
    Wql,
    /// WS-Management 3 and later: a PowerShell script serializes adapters as JSON.
    Script,
}

impl EnumerationStrategy {
    pub fn for_version(version: u32) -> Self {
        if version == 2 {
            EnumerationStrategy::Wql
        } else {
            EnumerationStrategy::Script
        }
    }
}

/// Major version of the guest's WS-Management stack.
pub async fn detect_remote_management_version(machine: &Machine) -> Result<u32> {
    debug!("Checking WSMan version on {}", machine.name);

    let script = render("wsman_version", &WsmanVersionTemplate)?;
    let output = machine.communicate.execute(&script).await?.stdout();
    debug!("WSMan version output: {:?}", output);

    parse_version(&output)
}

fn parse_version(output: &str) -> Result<u32> {
    output
        .trim()
        .parse::<u32>()
        .map_err(|_| WinGuestError::ProtocolDetection {
            output: output.to_string(),
        })
}

/// Lists guest adapters that have a MAC address.
pub async fn enumerate_adapters(machine: &Machine) -> Result<Vec<GuestAdapter>> {
    let version = detect_remote_management_version(machine).await?;
    enumerate_adapters_for_version(machine, version).await
}

/// Lists guest adapters using the strategy for an already detected `version`.
pub async fn enumerate_adapters_for_version(
    machine: &Machine,
    version: u32,
) -> Result<Vec<GuestAdapter>> {
    let strategy = EnumerationStrategy::for_version(version);
    debug!("WSMan version {} uses {:?} enumeration", version, strategy);

    let adapters = match strategy {
        EnumerationStrategy::Wql => enumerate_with_wql(machine).await?,
        EnumerationStrategy::Script => enumerate_with_script(machine).await?,
    };

    debug!("Guest reported {} adapters", adapters.len());
    Ok(adapters)
}

async fn enumerate_with_wql(machine: &Machine) -> Result<Vec<GuestAdapter>> {
    let mut result = machine.communicate.wql(NETWORK_ADAPTERS_WQL).await?;

    let Some(rows) = result.remove(NETWORK_ADAPTER_RESULT_SET) else {
        warn!("WQL answer has no {} result set", NETWORK_ADAPTER_RESULT_SET);
        return Ok(Vec::new());
    };

    parse_wql_rows(&rows)
}

/// Normalizes `Win32_NetworkAdapter` rows into adapters.
pub fn parse_wql_rows(rows: &[WqlRow]) -> Result<Vec<GuestAdapter>> {
    rows.iter().map(adapter_from_row).collect()
}

async fn enumerate_with_script(machine: &Machine) -> Result<Vec<GuestAdapter>> {
    let script = render("network_adapters", &NetworkAdaptersTemplate)?;
    let output = machine.communicate.execute(&script).await?.stdout();
    debug!("Adapter script output: {}", output);

    parse_adapter_json(&output)
}

/// Parses the serialized adapter list produced by the guest script.
///
/// PowerShell collapses a one element array into a bare object, so a single
/// object is accepted as one adapter.
pub fn parse_adapter_json(output: &str) -> Result<Vec<GuestAdapter>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Err(WinGuestError::AdapterParse {
            reason: "adapter script produced no output".to_string(),
        });
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| WinGuestError::AdapterParse {
        reason: format!("invalid JSON: {e}"),
    })?;

    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(row) => adapter_from_row(row),
                other => Err(WinGuestError::AdapterParse {
                    reason: format!("expected an adapter object, got {other}"),
                }),
            })
            .collect(),
        Value::Object(row) => Ok(vec![adapter_from_row(&row)?]),
        other => Err(WinGuestError::AdapterParse {
            reason: format!("expected an adapter array, got {other}"),
        }),
    }
}

/// Builds an adapter from a guest row. Keys are compared without case or
/// underscores, so `MACAddress`, `macaddress` and `mac_address` all match.
pub(crate) fn adapter_from_row(row: &WqlRow) -> Result<GuestAdapter> {
    let field = |wanted: &str| -> Option<&Value> {
        row.iter()
            .find(|(key, _)| canonical_key(key) == wanted)
            .map(|(_, value)| value)
    };

    let mac_address = field("macaddress")
        .and_then(value_to_string)
        .ok_or_else(|| WinGuestError::AdapterParse {
            reason: format!("adapter row without a MAC address: {row:?}"),
        })?;

    Ok(GuestAdapter {
        name: field("netconnectionid")
            .and_then(value_to_string)
            .unwrap_or_default(),
        mac_address: MacAddress::new(&mac_address),
        interface_index: field("interfaceindex")
            .and_then(value_to_string)
            .unwrap_or_default(),
        index: field("index").and_then(value_to_string).unwrap_or_default(),
    })
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
