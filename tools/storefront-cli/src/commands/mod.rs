//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod config;

use clap::{Args, Subcommand};
use storefront_cart::ItemId;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Catalog item id(s) to add.
    #[arg(required = true)]
    pub ids: Vec<ItemId>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Cart item id(s) to remove.
    #[arg(required = true)]
    pub ids: Vec<ItemId>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
