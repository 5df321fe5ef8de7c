/*
[INPUT]:  CLI arguments, YAML configuration file, environment secrets, OS signals
[OUTPUT]: Running boundary-aligned trading loop with graceful shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use weex_adapter::{Credentials, WeexClient};
use weex_ai_trader::{Driver, OpenRouterProvider, Pipeline, Secrets, TraderConfig};

#[derive(Parser, Debug)]
#[command(name = "weex-ai-trader", version, about = "Boundary-aligned AI trading loop for Weex futures")]
struct Cli {
    /// Configuration file; defaults apply when omitted
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Run every cycle without placing orders
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = match &args.config_path {
        Some(path) => {
            let path_str = path.to_str().context("config path must be valid utf-8")?;
            TraderConfig::from_file(path_str).context("load config")?
        }
        None => TraderConfig::default(),
    };
    info!(
        symbol = %config.symbol,
        interval_minutes = config.interval_minutes,
        model = %config.model,
        dry_run = args.dry_run,
        "starting weex-ai-trader"
    );

    let secrets = Secrets::from_env().context("read secrets from environment")?;
    if !secrets.has_exchange_credentials() {
        warn!("exchange credentials absent; running in observe-only mode");
    }

    let credentials = Credentials::new(
        secrets.weex_api_key.clone(),
        secrets.weex_secret_key.clone(),
        secrets.weex_passphrase.clone(),
    );
    let client = Arc::new(
        WeexClient::new(credentials, &config.base_url).context("build exchange client")?,
    );
    let provider = Arc::new(
        OpenRouterProvider::new(
            config.llm_base_url.clone(),
            secrets.llm_api_key.clone(),
            config.model.clone(),
            config.temperature,
        )
        .context("build completion client")?,
    );

    let pipeline = Pipeline::new(
        client,
        provider,
        config.artifact_dir.clone(),
        config.symbol.clone(),
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let driver = Driver::new(pipeline, &config, shutdown.clone());
    driver.run(args.dry_run).await;

    info!("shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
