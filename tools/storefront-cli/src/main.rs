//! Storefront - a two-screen shop in the terminal.
//!
//! Commands:
//! - `storefront catalog` - List catalog items, marking those in the cart
//! - `storefront add <id>...` - Add items to the cart
//! - `storefront cart` - Show the cart and its estimated total
//! - `storefront remove <id>...` - Remove items from the cart
//! - `storefront checkout` - Attempt checkout
//! - `storefront browse` - Interactive catalog and checkout screens
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ConfigArgs, RemoveArgs};

/// Storefront - browse the catalog and manage a persistent cart
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog items
    Catalog,

    /// Add catalog items to the cart
    Add(AddArgs),

    /// Show the cart
    Cart,

    /// Remove items from the cart
    Remove(RemoveArgs),

    /// Check out the cart
    Checkout,

    /// Browse the shop interactively
    Browse,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    setup_tracing(ctx.output.is_verbose(), &ctx.config.log_level);
    tracing::debug!(
        config = ?ctx.config_path,
        store = %ctx.config.store.path.display(),
        "context loaded"
    );

    let result = match cli.command {
        Commands::Catalog => commands::catalog::list(&ctx).await,
        Commands::Add(args) => commands::catalog::add(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Checkout => commands::cart::checkout(&ctx).await,
        Commands::Browse => commands::browse::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`.
fn setup_tracing(verbose: bool, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
