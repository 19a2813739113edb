//! SoulCare - terminal mental-wellness companion
//!
#![doc = "Main entry point for the SoulCare application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soulcare::cli::{Cli, Commands};
use soulcare::commands::{self, Context};
use soulcare::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::Quote) {
        commands::show_quote();
        return Ok(());
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let ctx = Context::open(&config)?;

    // Execute command
    match cli.command {
        Commands::Chat { resume, topic } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(id) = resume {
                tracing::debug!("Resuming conversation: {}", id);
            }
            commands::chat::run_chat(&ctx, resume, topic).await?;
        }
        Commands::Assess { chat } => {
            tracing::info!("Starting stress assessment");
            commands::assess::run_assess(&ctx, chat).await?;
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&ctx, command)?;
        }
        Commands::Quota => commands::show_quota(&ctx),
        Commands::Quote => commands::show_quote(),
    }

    Ok(())
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never mix with chat output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "soulcare=info" } else { "soulcare=warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
