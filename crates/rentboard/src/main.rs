//! rentboard - Brazilian rental price predictor dashboard

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use rentboard_core::{Dashboard, ServiceClient, ServiceConfig, TopN};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rentboard",
    version,
    about = "Brazilian Rental Price Predictor",
    long_about = "Terminal dashboard for a rental-price prediction service.\n\
                  \n\
                  Submits property attributes for a monthly cost prediction and charts\n\
                  the model's feature importances and per-city rental trends.\n\
                  \n\
                  Examples:\n\
                    rentboard                                   # Service at http://127.0.0.1:5000\n\
                    rentboard --api-url http://10.0.0.5:5000    # Remote service\n\
                    rentboard --top-n 5                         # Start with the top 5 features\n\
                  \n\
                  Environment Variables:\n\
                    RENTBOARD_API_URL                # Service base URL\n\
                    RENTBOARD_TIMEOUT_SECS           # Per-request timeout\n\
                    RUST_LOG                         # Log filter (logs go to --log-file)"
)]
struct Cli {
    /// Base URL of the prediction service (default: http://127.0.0.1:5000)
    #[arg(long, env = "RENTBOARD_API_URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "RENTBOARD_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Number of features shown initially (5, 10 or 15)
    #[arg(long, default_value = "10", value_parser = parse_top_n)]
    top_n: TopN,

    /// Log file (default: <cache dir>/rentboard/rentboard.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_top_n(value: &str) -> Result<TopN, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    TopN::from_value(n).ok_or_else(|| format!("top-n must be 5, 10 or 15 (got {})", n))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init_logging(&log_path) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let config = ServiceConfig::from_override(cli.api_url.as_deref())
        .context("Invalid service configuration")?
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    info!(
        base_url = config.base_url(),
        timeout_secs = cli.timeout_secs,
        top_n = cli.top_n.value(),
        "Starting rentboard"
    );

    let client = ServiceClient::new(config).context("Failed to build HTTP client")?;
    let dashboard = Arc::new(Dashboard::new(client, cli.top_n));

    rentboard_tui::run(dashboard).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_top_n() {
        assert_eq!(parse_top_n("15"), Ok(TopN::Fifteen));
        assert!(parse_top_n("7").unwrap_err().contains("5, 10 or 15"));
        assert!(parse_top_n("ten").is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "rentboard",
            "--api-url",
            "http://10.0.0.5:5000/",
            "--timeout-secs",
            "3",
            "--top-n",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:5000/"));
        assert_eq!(cli.timeout_secs, 3);
        assert_eq!(cli.top_n, TopN::Five);

        assert!(Cli::try_parse_from(["rentboard", "--timeout-secs", "0"]).is_err());
    }
}
