use crate::output::{OutputFormat, print_progress, print_success};
use winguest_core::{Config, Result};

pub async fn execute(config: Config, _format: OutputFormat) -> Result<()> {
    let machine = winguest_platform::get_machine(&config)?;

    print_progress(&format!("Setting networks on '{}' to Work", machine.name));
    winguest_network::set_networks_to_work(&machine).await?;

    print_success("Networks set to Work");
    Ok(())
}
