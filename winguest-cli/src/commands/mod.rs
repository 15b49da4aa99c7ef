mod adapters;
mod configure;
mod interfaces;
mod work_network;

use clap::Subcommand;
use winguest_core::{Config, Result};

use crate::output::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the configured networks to the guest
    Configure {
        /// Skip switching networks to the Work location, even if configured
        #[arg(long)]
        no_work_network: bool,

        /// Do not append to the machine journal
        #[arg(long)]
        no_journal: bool,
    },

    /// Show which guest adapter backs each provider NIC slot
    Interfaces,

    /// List network adapters reported by the guest
    Adapters,

    /// Switch every guest network to the Work location
    SetWorkNetwork,
}

pub async fn execute(command: Command, config: Config, format: OutputFormat) -> Result<()> {
    match command {
        Command::Configure {
            no_work_network,
            no_journal,
        } => configure::execute(no_work_network, no_journal, config, format).await,
        Command::Interfaces => interfaces::execute(config, format).await,
        Command::Adapters => adapters::execute(config, format).await,
        Command::SetWorkNetwork => work_network::execute(config, format).await,
    }
}
