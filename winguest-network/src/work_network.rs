use tracing::info;
use winguest_core::{Machine, Result};

use crate::scripts::{SetWorkNetworkTemplate, render};

/// Moves every guest connection to the "Work" network location so the host
/// can reach the guest over a private network (needed on Windows 7).
pub async fn set_networks_to_work(machine: &Machine) -> Result<()> {
    info!("Setting networks to 'Work Network'");

    let script = render("set_work_network", &SetWorkNetworkTemplate)?;
    machine.communicate.execute(&script).await?;

    Ok(())
}
