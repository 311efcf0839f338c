use log::{LevelFilter, error, info};
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};
use nba_api::mock::MockGenerator;
use std::env;
use tokio::net::TcpListener;

const BIND_ENV: &str = "COURTSIDE_BIND";
const LOG_LEVEL_ENV: &str = "COURTSIDE_LOG";
const DEFAULT_BIND: &str = "127.0.0.1:8788";

fn init_logger() -> anyhow::Result<()> {
    let level = env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

fn usage_text() -> &'static str {
    "courtside-server - mock NBA scores over HTTP

Usage:
  courtside-server
  courtside-server --help
  courtside-server --version

Routes:
  GET /api/games?date=YYYY-MM-DD
  GET /api/games/{id}/scores
  GET /api/games/{id}/players?home=ABBR&away=ABBR

Environment:
  COURTSIDE_BIND   Listen address (default 127.0.0.1:8788)
  COURTSIDE_LOG    Log level (default info)"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(arg) = env::args().nth(1) {
        match arg.as_str() {
            "-h" | "--help" => println!("{}", usage_text()),
            "-V" | "--version" => println!("courtside-server {}", env!("CARGO_PKG_VERSION")),
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    init_logger()?;

    let addr = env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = TcpListener::bind(&addr).await?;
    nba_api::server::serve(listener, MockGenerator::new(), shutdown_signal()).await?;
    Ok(())
}
