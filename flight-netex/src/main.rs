use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use flight_netex::config::AppConfig;
use flight_netex::pipeline::run;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    info!(
        feed = %config.feed_path.display(),
        output = %config.output_dir.display(),
        codespace = %config.converter.document.codespace.xmlns,
        "starting conversion"
    );

    match run(&config, Utc::now()).await {
        Ok(summary) if summary.is_complete() => {}
        Ok(summary) => {
            error!(
                lines = ?summary.failed_lines,
                common = summary.common_written,
                "some documents were not written"
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "conversion run failed");
            std::process::exit(1);
        }
    }
}
