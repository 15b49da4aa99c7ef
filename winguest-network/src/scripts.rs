use askama::Template;
use winguest_core::{Result, WinGuestError};

/// Selects every adapter the guest can report a MAC address for.
pub const NETWORK_ADAPTERS_WQL: &str =
    "SELECT * FROM Win32_NetworkAdapter WHERE MACAddress IS NOT NULL";

// Askama templates for guest-side PowerShell
#[derive(Template)]
#[template(path = "wsman_version.ps1", escape = "none")]
pub(crate) struct WsmanVersionTemplate;

#[derive(Template)]
#[template(path = "network_adapters.ps1", escape = "none")]
pub(crate) struct NetworkAdaptersTemplate;

#[derive(Template)]
#[template(path = "dhcp_enabled.ps1", escape = "none")]
pub(crate) struct DhcpEnabledTemplate<'a> {
    pub(crate) index: &'a str,
}

#[derive(Template)]
#[template(path = "set_static_address.ps1", escape = "none")]
pub(crate) struct SetStaticAddressTemplate<'a> {
    pub(crate) name: &'a str,
    pub(crate) ip: &'a str,
    pub(crate) netmask: &'a str,
}

#[derive(Template)]
#[template(path = "set_dhcp.ps1", escape = "none")]
pub(crate) struct SetDhcpTemplate<'a> {
    pub(crate) name: &'a str,
}

#[derive(Template)]
#[template(path = "set_work_network.ps1", escape = "none")]
pub(crate) struct SetWorkNetworkTemplate;

pub(crate) fn render<T: Template>(name: &str, template: &T) -> Result<String> {
    let script = template.render().map_err(|e| WinGuestError::TemplateError {
        template: name.to_string(),
        message: e.to_string(),
    })?;
    Ok(script.trim_end().to_string())
}
