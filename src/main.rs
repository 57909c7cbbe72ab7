//! Absent Helper - chat bot binary
//!
//! ```bash
//! # Serve Twitch chat
//! TWITCH_USERNAME=helperbot TWITCH_OAUTH=... TWITCH_CHANNEL=runner \
//!   LIVESPLIT_CONFIG=~/LiveSplit/settings.cfg absent-helper serve
//!
//! # Try commands locally
//! absent-helper console
//! ```

use absent_helper::transport::{ConsoleTransport, IrcTransport};
use absent_helper::{build_dispatcher, runner, Config};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "absent-helper")]
#[command(about = "Twitch chat bot for LiveSplit, Spotify and Pastebin")]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// LiveSplit settings document (overrides config and LIVESPLIT_CONFIG)
    #[arg(long, global = true)]
    livesplit_config: Option<PathBuf>,

    /// Command prefix (overrides config and COMMAND_PREFIX)
    #[arg(long, global = true)]
    prefix: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join Twitch chat and answer commands
    Serve,

    /// Read commands from stdin and print replies to stdout
    Console,

    /// Validate the configuration and print the comparison table
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so console mode keeps stdout for replies
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,absent_helper=debug".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_yaml_and_env(Some(cli.config.as_path()))?;
    if let Some(path) = cli.livesplit_config {
        config.livesplit_config = Some(path);
    }
    if let Some(prefix) = cli.prefix {
        config.command_prefix = prefix;
    }

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Console => console(config).await,
        Commands::CheckConfig => check_config(config),
    }
}

/// Stay in chat until killed, reconnecting after every dropped session.
async fn serve(config: Config) -> Result<()> {
    let irc = config.irc_config()?;
    let mut dispatcher = build_dispatcher(&config)?;

    loop {
        match IrcTransport::connect(&irc).await {
            Ok(mut transport) => {
                info!(channel = %irc.channel, "Joined chat");
                if let Err(e) = runner::run(&mut transport, &mut dispatcher).await {
                    warn!("Chat session failed: {:#}", e);
                }
            }
            Err(e) => error!("Failed to connect to chat: {}", e),
        }

        info!(
            delay_secs = RECONNECT_DELAY.as_secs(),
            "Reconnecting to chat"
        );
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn console(config: Config) -> Result<()> {
    let mut dispatcher = build_dispatcher(&config)?;
    let mut transport = ConsoleTransport::stdio();
    let stats = runner::run(&mut transport, &mut dispatcher).await?;
    info!(
        "Console session done: {} messages, {} replies",
        stats.messages, stats.replies
    );
    Ok(())
}

fn check_config(config: Config) -> Result<()> {
    let dispatcher = build_dispatcher(&config)?;

    println!("Command prefix: {}", dispatcher.prefix());
    println!("LiveSplit Server: {}", config.livesplit_addr);
    match config.irc_config() {
        Ok(irc) => println!("Chat: {} as {}", irc.channel, irc.nick),
        Err(e) => println!("Chat: not configured ({})", e),
    }
    println!("Comparisons:");
    for (name, active) in dispatcher.activation().sorted() {
        println!("  {:<24} {}", name, if active { "active" } else { "inactive" });
    }
    Ok(())
}
