//! Balance Notifier - sends low-balance notices from the command line.

use anyhow::{Context, Result};
use balance_notifier::{
    cli::{Cli, Command},
    config::Config,
    BalanceEvent, BalanceNotifier, UserInfo,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        let _ = tracing_subscriber::fmt().try_init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Cloud API URL: {}", config.cloud.api_url);
    info!("Cloud Timeout: {}s", config.cloud.timeout_seconds);
    info!(
        "Cloud Mail: {}",
        if config.params.service_mail().is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!(
        "SMTP Server: {}:{}",
        config.params.smtp_server, config.params.smtp_port
    );
    info!("-------------------------------------------------------");

    let Some(Command::Notify { event, user }) = cli.command else {
        info!("No command given, nothing to send.");
        return Ok(());
    };

    let event: BalanceEvent = event.parse()?;
    let raw = tokio::fs::read_to_string(&user)
        .await
        .with_context(|| format!("failed to read user record {}", user.display()))?;
    let userinfo: UserInfo = serde_json::from_str(&raw)
        .with_context(|| format!("invalid user record in {}", user.display()))?;

    let notifier = BalanceNotifier::from_config(&config)?;
    info!(event = %event, account = %userinfo.account_number, "Dispatching balance event");
    notifier.dispatch(event, &userinfo).await?;
    Ok(())
}
