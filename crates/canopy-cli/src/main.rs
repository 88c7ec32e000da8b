mod bundles;
mod chat;
mod notifier;
mod pricing;
mod products;
mod settings;

use anyhow::Context;
use canopy_admin::{AdminShell, Outcome};
use canopy_client::CanopyClient;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::notifier::TerminalNotifier;

#[derive(Debug, Parser)]
#[command(name = "canopy")]
#[command(about = "Dispensary storefront back-office from the terminal")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage menu products
    Products {
        #[command(subcommand)]
        command: products::ProductCommands,
    },
    /// Pricing rules and base price tiers
    Pricing {
        #[command(subcommand)]
        command: pricing::PricingCommands,
    },
    /// Promotional specials
    Specials {
        #[command(subcommand)]
        command: pricing::SpecialCommands,
    },
    /// Product bundles
    Bundles {
        #[command(subcommand)]
        command: bundles::BundleCommands,
    },
    /// Storefront menu settings
    Settings {
        #[command(subcommand)]
        command: settings::SettingsCommands,
    },
    /// Talk to the scripted concierge
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = canopy_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "canopy starting");

    if let Commands::Chat = cli.command {
        return chat::run_chat(&config).await;
    }

    let client = CanopyClient::from_config(&config).context("failed to build API client")?;
    let mut shell = AdminShell::load(client, TerminalNotifier::new(cli.yes)).await?;

    match cli.command {
        Commands::Products { command } => products::run(&mut shell, command).await,
        Commands::Pricing { command } => pricing::run_pricing(&mut shell, command).await,
        Commands::Specials { command } => pricing::run_specials(&mut shell, command).await,
        Commands::Bundles { command } => bundles::run(&mut shell, command).await,
        Commands::Settings { command } => settings::run(&mut shell, command).await,
        Commands::Chat => Ok(()),
    }
}

/// Maps a shell outcome to the command's exit status. Alerts have already
/// been printed by the notifier.
fn finish(outcome: Outcome, done: &str) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied => {
            println!("{done}");
            Ok(())
        }
        Outcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
        Outcome::Skipped => anyhow::bail!("nothing to do"),
        Outcome::Invalid | Outcome::Failed | Outcome::Busy | Outcome::Unsupported => {
            anyhow::bail!("command did not complete ({outcome:?})")
        }
    }
}

/// Shortens `s` to `max` characters with a trailing ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}
