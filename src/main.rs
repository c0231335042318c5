//! telewaves - Telegram media monitor
//!
//! Usage:
//!   telewaves            - Monitor messages and download matching media
//!   telewaves auth       - Sign in interactively and persist the session
//!   telewaves status     - Show configuration and session state
//!
//! Configuration comes from environment variables (a local `.env` file is
//! honored):
//!   TELEGRAM_API_ID      - API ID from my.telegram.org/apps (required)
//!   TELEGRAM_API_HASH    - API hash from my.telegram.org/apps (required)
//!   DOWNLOAD_DIR         - Where media is saved (default: /library)
//!   DATA_DIR             - Application data directory (default: /data)
//!   SESSION_NAME         - Session file name (default: telegram)
//!   CHAT_FILTER          - Comma-separated chat ids/@handles (optional)
//!   EXTENSIONS_FILTER    - Comma-separated extensions or presets (optional)

use clap::{Parser, Subcommand};
use telewaves::{Config, Monitor, Result, TelegramAccount};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "telewaves")]
#[command(version)]
#[command(about = "Telegram media monitor that downloads matching attachments")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monitor messages and download matching media (default)
    Run,

    /// Sign in interactively and persist the session
    Auth,

    /// Show configuration and session state
    Status,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli.command.unwrap_or(Commands::Run)).await {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run_command(command: Commands) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::Run => Monitor::new(config).run().await,
        Commands::Auth => cmd_auth(config).await,
        Commands::Status => cmd_status(config).await,
    }
}

async fn cmd_auth(config: Config) -> Result<()> {
    let account = TelegramAccount::connect(&config).await?;

    let result: Result<()> = async {
        if account.is_authorized().await? {
            info!("Already authenticated!");
        } else {
            account.sign_in_interactive().await?;
            info!("Successfully authenticated as {}", account.whoami().await?);
        }
        Ok(())
    }
    .await;

    account.disconnect().await;
    result
}

async fn cmd_status(config: Config) -> Result<()> {
    println!("telewaves status");
    println!("================");
    println!();
    println!("Download directory: {}", config.download_dir.display());
    println!("Data directory: {}", config.data_dir.display());
    println!("Session file: {}", config.session_path().display());
    if config.chat_filter.is_empty() {
        println!("Chat filter: (all chats)");
    } else {
        let mut entries: Vec<&str> = config.chat_filter.iter().map(String::as_str).collect();
        entries.sort_unstable();
        println!("Chat filter: {}", entries.join(", "));
    }
    if config.extensions_filter.is_empty() {
        println!("Extension filter: (all media)");
    } else {
        let mut entries: Vec<&str> = config.extensions_filter.iter().map(String::as_str).collect();
        entries.sort_unstable();
        println!("Extension filter: {}", entries.join(", "));
    }

    let account = TelegramAccount::connect(&config).await?;
    if account.is_authorized().await.unwrap_or(false) {
        println!("Telegram: session authorized");
    } else {
        println!("Telegram: NOT authorized (run 'telewaves auth')");
    }
    account.disconnect().await;

    Ok(())
}
