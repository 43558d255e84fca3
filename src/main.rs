use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use twet::app::AppContext;
use twet::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides --debug
    let default_filter = if cli.debug { "twet=debug" } else { "twet=warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut ctx = AppContext::new(cli.dir.as_deref())?;

    match cli.command {
        Commands::Following => {
            commands::following(&ctx)?;
        }
        Commands::Follow { nick, url } => {
            commands::follow(&mut ctx, &nick, &url)?;
        }
        Commands::Unfollow { nick } => {
            commands::unfollow(&mut ctx, &nick)?;
        }
        Commands::Timeline {
            ascending,
            limit,
            timeout,
        } => {
            commands::timeline(&ctx, ascending, limit, timeout).await?;
        }
        Commands::Thread { hash } => {
            commands::thread(&ctx, &hash).await?;
        }
        Commands::Hash { url, line } => {
            commands::hash(&url, &line)?;
        }
    }

    Ok(())
}
