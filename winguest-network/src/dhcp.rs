use tracing::debug;
use winguest_core::{CommandOutput, Machine, Result};

use crate::scripts::{DhcpEnabledTemplate, render};

/// Whether DHCP is enabled on the adapter configuration with the given index.
///
/// The query only returns rows for adapters that have DHCP enabled, so any
/// output line at all, on either stream, counts as enabled. A query that
/// comes back empty for another reason reads as disabled.
pub async fn is_dhcp_enabled(machine: &Machine, index: &str) -> Result<bool> {
    let command = render("dhcp_enabled", &DhcpEnabledTemplate { index })?;
    let output = machine.communicate.execute(&command).await?;

    let enabled = any_output(&output);
    if enabled {
        debug!("DHCP is enabled for adapter index {}", index);
    } else {
        debug!("DHCP is disabled for adapter index {}", index);
    }

    Ok(enabled)
}

fn any_output(output: &CommandOutput) -> bool {
    !output.is_empty()
}
